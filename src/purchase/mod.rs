//! The purchase flow: availability check followed by order placement.

pub mod error;
pub mod orchestrator;

pub use error::*;
pub use orchestrator::*;
