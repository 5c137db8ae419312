#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Petstore Buyer
//!
//! > **Check a pet's availability, then order it.**
//!
//! This crate buys pets from a petstore-style REST backend. A purchase is two
//! remote calls: look the pet up in the inventory service, and if its status is
//! exactly `"available"`, place an order for it with the store service.
//!
//! ```ignore
//! use petstore_buyer::{Context, PurchaseError, PurchaseOrchestrator};
//! use std::time::Duration;
//!
//! let buyer = PurchaseOrchestrator::connect("http://localhost:8080/api/v3")?;
//! let ctx = Context::background().with_timeout(Duration::from_secs(5));
//!
//! match buyer.buy(&ctx, 1).await {
//!     Ok(order_id) => println!("ordered as {order_id}"),
//!     Err(PurchaseError::NotAvailable) => println!("already taken"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
//! ## Architecture Notes
//!
//! ### 1. Swappable Collaborators
//! The orchestrator is generic over two traits, [`InventoryService`](clients::InventoryService)
//! and [`OrderService`](clients::OrderService). The HTTP clients implement them for
//! production; [`clients::mock`] implements them with expectation queues for tests.
//!
//! ### 2. Type-Safe Error Handling
//! Every failure is a [`PurchaseError`] variant. `NotAvailable` is matched, never
//! string-compared, and collaborator failures keep their cause via `source()`.
//!
//! ### 3. Cancellation
//! Callers pass a [`Context`] carrying a deadline and/or a cancel signal. Both
//! remote calls are raced against it, so a cancelled purchase returns promptly
//! instead of continuing to the next step.
//!
//! ### 4. Observability
//! We use `tracing` with one span per `buy` and nested spans per remote call.
//! See [`runtime::tracing`].
//!
//! ## Module Tour
//!
//! - [`purchase`]: the orchestrator and its error type.
//! - [`clients`]: collaborator traits, HTTP implementations, mocks.
//! - [`model`]: `Pet`, `Order`, and the create-order payload.
//! - [`context`]: deadlines and cancellation.
//! - [`runtime`]: endpoint configuration and tracing setup.

pub mod clients;
pub mod context;
pub mod model;
pub mod purchase;
pub mod runtime;

pub use context::{CancelHandle, Context, Interrupted};
pub use purchase::{PurchaseError, PurchaseOrchestrator};
