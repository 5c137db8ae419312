//! # Purchase Orchestrator
//!
//! One purchase attempt is a fixed sequence:
//!
//! ```text
//! Start → Fetching ─┬─ Failed
//!                   └─ Evaluating ─┬─ Rejected
//!                                  └─ Placing ─┬─ Failed
//!                                              └─ Completed
//! ```
//!
//! Nothing is kept between calls, so one orchestrator can serve any number of
//! concurrent `buy` calls. Both remote calls are raced against the caller's
//! [`Context`]; an order is only placed once the lookup and the availability
//! check have succeeded, so a failure never leaves anything to roll back.

use tracing::{debug, info, instrument, warn};

use crate::clients::{InventoryClient, InventoryService, OrderClient, OrderService, ServiceError};
use crate::context::Context;
use crate::model::{OrderId, PetId};
use crate::purchase::PurchaseError;
use crate::runtime::{ConfigError, PetstoreConfig};

/// Checks a pet's availability and, if it is available, orders it.
#[derive(Debug, Clone)]
pub struct PurchaseOrchestrator<I = InventoryClient, O = OrderClient> {
    inventory: I,
    orders: O,
}

impl PurchaseOrchestrator {
    /// Builds HTTP clients for the endpoints named in `config`.
    pub fn from_config(config: &PetstoreConfig) -> Result<Self, ConfigError> {
        let (inventory, orders) = config.build_clients()?;
        Ok(Self::new(inventory, orders))
    }

    /// Convenience for deployments where both services share one base URL.
    pub fn connect(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        Self::from_config(&PetstoreConfig::shared(base_url))
    }
}

impl<I: InventoryService, O: OrderService> PurchaseOrchestrator<I, O> {
    pub fn new(inventory: I, orders: O) -> Self {
        Self { inventory, orders }
    }

    /// Buys the pet identified by `pet_id` and returns the new order's id.
    ///
    /// # Errors
    ///
    /// - [`PurchaseError::LookupFailed`] if the inventory call fails.
    /// - [`PurchaseError::NotAvailable`] if the pet's status is anything but
    ///   exactly `"available"`; the store is not called.
    /// - [`PurchaseError::OrderFailed`] if the store call fails.
    /// - [`PurchaseError::Cancelled`] / [`PurchaseError::DeadlineExceeded`] if
    ///   `ctx` fires before the in-flight call finishes.
    #[instrument(skip(self, ctx))]
    pub async fn buy(&self, ctx: &Context, pet_id: PetId) -> Result<OrderId, PurchaseError> {
        debug!("Fetching pet");
        let pet = match ctx.run(self.inventory.get_pet(ctx, pet_id)).await? {
            Ok(pet) => pet,
            Err(source) => {
                return Err(failure(ctx, source, |source| PurchaseError::LookupFailed {
                    pet_id,
                    source,
                }));
            }
        };

        if !pet.is_available() {
            info!(status = ?pet.status, "Pet not available");
            return Err(PurchaseError::NotAvailable);
        }

        // Order what the inventory reported, not what was asked for.
        let order_pet_id = pet.id;
        debug!(order_pet_id, "Placing order");
        let order = match ctx.run(self.orders.place_order(ctx, order_pet_id)).await? {
            Ok(order) => order,
            Err(source) => {
                return Err(failure(ctx, source, |source| PurchaseError::OrderFailed {
                    pet_id: order_pet_id,
                    source,
                }));
            }
        };

        info!(order_id = order.id, "Purchase completed");
        Ok(order.id)
    }
}

/// Wraps a collaborator error, unless the context already explains it.
fn failure(
    ctx: &Context,
    source: ServiceError,
    wrap: impl FnOnce(ServiceError) -> PurchaseError,
) -> PurchaseError {
    if let Some(reason) = ctx.err() {
        warn!(error = %source, %reason, "Call failed after context was done");
        return reason.into();
    }
    let cause = source.to_string();
    let err = wrap(source);
    warn!(error = %err, %cause, "Purchase failed");
    err
}
