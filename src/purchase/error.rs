//! Error types for the purchase flow.

use crate::clients::ServiceError;
use crate::context::Interrupted;
use crate::model::PetId;
use thiserror::Error;

/// Errors that can end a purchase attempt.
#[derive(Debug, Error)]
pub enum PurchaseError {
    /// The inventory lookup did not complete successfully.
    #[error("get pet failed for id {pet_id}")]
    LookupFailed {
        pet_id: PetId,
        #[source]
        source: ServiceError,
    },

    /// The pet exists but its status does not allow a purchase.
    #[error("pet not available")]
    NotAvailable,

    /// The order placement did not complete successfully.
    #[error("create order failed for pet {pet_id}")]
    OrderFailed {
        pet_id: PetId,
        #[source]
        source: ServiceError,
    },

    #[error("purchase cancelled")]
    Cancelled,

    #[error("purchase deadline exceeded")]
    DeadlineExceeded,
}

impl PurchaseError {
    /// The pet id a collaborator failure refers to.
    pub fn pet_id(&self) -> Option<PetId> {
        match self {
            PurchaseError::LookupFailed { pet_id, .. }
            | PurchaseError::OrderFailed { pet_id, .. } => Some(*pet_id),
            _ => None,
        }
    }

    /// True for the caller-side interruptions (cancel or deadline).
    pub fn is_interrupted(&self) -> bool {
        matches!(self, PurchaseError::Cancelled | PurchaseError::DeadlineExceeded)
    }
}

impl From<Interrupted> for PurchaseError {
    fn from(reason: Interrupted) -> Self {
        match reason {
            Interrupted::Cancelled => PurchaseError::Cancelled,
            Interrupted::DeadlineExceeded => PurchaseError::DeadlineExceeded,
        }
    }
}
