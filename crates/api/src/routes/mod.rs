//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Liveness message
//! GET  /health                 - Health check (plain text)
//!
//! # Orders (JSON)
//! POST /api/create-order       - Record a pending order from a cart
//! POST /api/payment-success    - Mark paid and send seller + customer emails
//! GET  /api/orders             - Dump every order (unauthenticated)
//! ```

pub mod home;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(home::health))
        .nest("/api", api_routes())
}

/// Create the order API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/create-order", post(orders::create_order))
        .route("/payment-success", post(orders::payment_success))
        .route("/orders", get(orders::list_orders))
}
