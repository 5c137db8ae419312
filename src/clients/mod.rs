//! Petstore collaborators: the traits the purchase flow depends on, their
//! HTTP implementations, and in-memory doubles for tests.

pub mod api_client;
pub mod error;
pub mod inventory_client;
pub mod mock;
pub mod order_client;
pub mod traits;

pub use api_client::*;
pub use error::*;
pub use inventory_client::*;
pub use order_client::*;
pub use traits::*;
