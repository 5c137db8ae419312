//! Purchase orders and the payload that creates them.

use crate::model::PetId;
use serde::{Deserialize, Serialize};

/// Identifier assigned to an order by the store service.
pub type OrderId = i64;

/// An order as returned by the store service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Missing ids decode as `0`.
    #[serde(default)]
    pub id: OrderId,
    #[serde(default)]
    pub pet_id: Option<PetId>,
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub ship_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub complete: Option<bool>,
}

impl Order {
    pub fn new(id: OrderId, pet_id: PetId) -> Self {
        Self {
            id,
            pet_id: Some(pet_id),
            quantity: None,
            ship_date: None,
            status: None,
            complete: None,
        }
    }
}

/// Payload for creating a new order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub pet_id: PetId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
}

impl OrderCreate {
    pub fn for_pet(pet_id: PetId) -> Self {
        Self { pet_id, quantity: None }
    }
}
