//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Health check
//!
//! # Store (JSON, consumed by the purchase screen UI)
//! GET  /store                   - Purchase screen data (catalog, tier, pricing)
//! POST /store/tier              - Switch the active pricing tier
//! POST /store/plan              - Select a subscription duration
//! POST /store/purchase/plan     - Start a purchase of the selected plan
//! POST /store/purchase/package  - Start a credit top-up purchase
//! GET  /store/channels          - Ranked support channels for the picker
//! POST /store/dispatch          - Hand the pending intent to a channel
//! POST /store/cancel            - Discard the pending intent
//! ```

pub mod store;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the store routes router.
pub fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(store::show))
        .route("/tier", post(store::set_tier))
        .route("/plan", post(store::select_plan))
        .route("/purchase/plan", post(store::purchase_plan))
        .route("/purchase/package", post(store::purchase_package))
        .route("/channels", get(store::channels))
        .route("/dispatch", post(store::dispatch))
        .route("/cancel", post(store::cancel))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new().nest("/store", store_routes())
}
