//! # Mock Collaborators
//!
//! In-memory stand-ins for [`InventoryService`] and [`OrderService`] with an
//! expectation queue, so purchase logic can be tested without a server.
//!
//! ```ignore
//! let inventory = MockInventory::new();
//! inventory.expect_get_pet(1).return_ok(Pet::new(1, "available"));
//!
//! let orders = MockOrders::new();
//! orders.expect_place_order(1).return_ok(Order::new(10, 1));
//!
//! let buyer = PurchaseOrchestrator::new(inventory.clone(), orders.clone());
//! assert_eq!(buyer.buy(&Context::background(), 1).await?, 10);
//!
//! inventory.verify();
//! orders.verify();
//! ```
//!
//! Each call pops the next expectation. A call with nothing queued, or with a
//! pet id different from the expected one, panics.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::clients::{InventoryService, OrderService, ServiceError};
use crate::context::Context;
use crate::model::{Order, Pet, PetId};

enum Response<T> {
    Ready(Result<T, ServiceError>),
    /// Never resolves; used to exercise cancellation.
    Pending,
}

struct Expectation<T> {
    pet_id: PetId,
    response: Response<T>,
}

struct MockState<T> {
    expectations: VecDeque<Expectation<T>>,
    calls: Vec<PetId>,
}

/// A collaborator double answering with queued responses.
///
/// Clones share the same queue and call log, so a test can hand one clone to
/// the code under test and keep another for [`Mock::verify`].
pub struct Mock<T> {
    state: Arc<Mutex<MockState<T>>>,
}

/// Stand-in for the inventory service.
pub type MockInventory = Mock<Pet>;

/// Stand-in for the store service.
pub type MockOrders = Mock<Order>;

impl<T> Clone for Mock<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T> Default for Mock<T> {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                expectations: VecDeque::new(),
                calls: Vec::new(),
            })),
        }
    }
}

impl<T: Send> Mock<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects the next call to target `pet_id`.
    pub fn expect(&self, pet_id: PetId) -> ExpectationBuilder<T> {
        ExpectationBuilder {
            pet_id,
            state: self.state.clone(),
        }
    }

    /// Pet ids of every call received so far, in order.
    pub fn calls(&self) -> Vec<PetId> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let state = self.state.lock().unwrap();
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }

    async fn respond(&self, pet_id: PetId) -> Result<T, ServiceError> {
        let expectation = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(pet_id);
            state.expectations.pop_front()
        };

        let Some(expectation) = expectation else {
            panic!("Unexpected call for pet {pet_id}: no expectations left");
        };
        assert_eq!(
            expectation.pet_id, pet_id,
            "Expectation mismatch: expected pet {}, got pet {pet_id}",
            expectation.pet_id
        );

        match expectation.response {
            Response::Ready(result) => result,
            Response::Pending => std::future::pending().await,
        }
    }
}

impl MockInventory {
    /// Expects a `get_pet` call.
    pub fn expect_get_pet(&self, pet_id: PetId) -> ExpectationBuilder<Pet> {
        self.expect(pet_id)
    }
}

impl MockOrders {
    /// Expects a `place_order` call.
    pub fn expect_place_order(&self, pet_id: PetId) -> ExpectationBuilder<Order> {
        self.expect(pet_id)
    }
}

#[async_trait]
impl InventoryService for MockInventory {
    async fn get_pet(&self, _ctx: &Context, pet_id: PetId) -> Result<Pet, ServiceError> {
        self.respond(pet_id).await
    }
}

#[async_trait]
impl OrderService for MockOrders {
    async fn place_order(&self, _ctx: &Context, pet_id: PetId) -> Result<Order, ServiceError> {
        self.respond(pet_id).await
    }
}

/// Builder for a single queued response.
pub struct ExpectationBuilder<T> {
    pet_id: PetId,
    state: Arc<Mutex<MockState<T>>>,
}

impl<T> ExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: T) {
        self.push(Response::Ready(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ServiceError) {
        self.push(Response::Ready(Err(error)));
    }

    /// Sets the expectation to never answer.
    pub fn return_pending(self) {
        self.push(Response::Pending);
    }

    fn push(self, response: Response<T>) {
        let mut state = self.state.lock().unwrap();
        state.expectations.push_back(Expectation {
            pet_id: self.pet_id,
            response,
        });
    }
}
