//! # Collaborator Traits
//!
//! The purchase flow depends on two remote capabilities. Each is an
//! `#[async_trait]` so the HTTP clients in this module and the in-memory
//! doubles in [`mock`](crate::clients::mock) are interchangeable.

use crate::clients::ServiceError;
use crate::context::Context;
use crate::model::{Order, Pet, PetId};
use async_trait::async_trait;

/// Read access to pet records.
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Returns the current state of the identified pet.
    async fn get_pet(&self, ctx: &Context, pet_id: PetId) -> Result<Pet, ServiceError>;
}

/// Order creation against the store.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Creates a new order for `pet_id` and returns it with its assigned id.
    async fn place_order(&self, ctx: &Context, pet_id: PetId) -> Result<Order, ServiceError>;
}
