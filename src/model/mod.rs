//! Petstore data transfer objects shared by the service clients.

pub mod order;
pub mod pet;

pub use order::*;
pub use pet::*;
