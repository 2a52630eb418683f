//! Unified error handling with Sentry integration.
//!
//! Every route handler returns `Result<T, AppError>`. Errors leave the server
//! as the storefront's JSON envelope `{"success": false, "error": "..."}`,
//! and server-side failures are captured to Sentry before responding.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::NotificationError;
use crate::store::StoreError;

const ORDER_NOT_FOUND: &str = "Commande non trouvée";
const ORDER_ALREADY_PAID: &str = "Commande déjà payée";
const NOTIFICATION_FAILED: &str = "Échec de l'envoi des emails de confirmation";

/// Application-level error type for the order API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request body missing, malformed or of the wrong shape.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Referenced order does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Order is not in a state that allows the operation.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Rendering or delivering a notification email failed.
    #[error("Notification error: {0}")]
    Notification(#[from] NotificationError),
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id.to_string()),
            StoreError::AlreadyPaid(id) => Self::Conflict(id.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl AppError {
    /// HTTP status for this error.
    ///
    /// Validation failures share the 500 of other unhandled request errors;
    /// only a missing order is distinguished (404) and a repeated payment
    /// confirmation (409).
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Validation(_) | Self::Notification(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message shown to the client. Never includes internal details.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::NotFound(_) => ORDER_NOT_FOUND.to_string(),
            Self::Conflict(_) => ORDER_ALREADY_PAID.to_string(),
            Self::Notification(_) => NOTIFICATION_FAILED.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::Notification(_) => {
                let event_id = sentry::capture_error(&self);
                tracing::error!(
                    error = %self,
                    sentry_event_id = %event_id,
                    "Request error"
                );
            }
            Self::Validation(_) | Self::Conflict(_) => {
                tracing::warn!(error = %self, "Request rejected");
            }
            Self::NotFound(_) => {
                tracing::info!(error = %self, "Request for unknown order");
            }
        }

        let body = ErrorBody {
            success: false,
            error: self.public_message(),
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
