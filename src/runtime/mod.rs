//! Runtime concerns around the purchase flow: endpoint configuration and
//! tracing setup.

pub mod config;
pub mod tracing;

pub use self::config::*;
pub use self::tracing::*;
