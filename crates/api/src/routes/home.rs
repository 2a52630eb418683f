//! Liveness endpoints.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::state::AppState;

/// Body of the `/` liveness message.
#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub message: String,
}

/// Liveness message naming the shop.
pub async fn index(State(state): State<AppState>) -> Json<StatusMessage> {
    Json(StatusMessage {
        message: format!("API {} fonctionne !", state.shop().name),
    })
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the mail relay.
pub async fn health() -> &'static str {
    "ok"
}
