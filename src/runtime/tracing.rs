//! # Observability & Tracing
//!
//! Every `buy` runs inside an instrumented span carrying the `pet_id`, and the
//! HTTP clients add nested spans per remote call:
//!
//! ```text
//! DEBUG buy{pet_id=1}: Fetching pet
//! DEBUG buy{pet_id=1}:get_pet{pet_id=1}: Received response status=200 OK url=http://host/pet/1
//! DEBUG buy{pet_id=1}: Placing order order_pet_id=1
//! INFO buy{pet_id=1}:create_order{payload=OrderCreate { .. }}: Order created order_id=10
//! INFO buy{pet_id=1}: Purchase completed order_id=10
//! ```
//!
//! Rejections log at `info`, collaborator failures at `warn`.
//!
//! ```bash
//! RUST_LOG=info cargo test
//! RUST_LOG=petstore_buyer=debug cargo test
//! ```

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
///
/// Panics if a global subscriber is already set; use [`try_setup_tracing`]
/// when that is possible.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}

/// Like [`setup_tracing`], but leaves an existing subscriber in place.
pub fn try_setup_tracing() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}
