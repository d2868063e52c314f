//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::cart::CartStoreError;
use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Product API operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Checkout composition or delivery failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Cart persistence failed.
    #[error("Cart store error: {0}")]
    CartStore(#[from] CartStoreError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether this error class is a server-side fault worth tracking.
    const fn is_server_error(&self) -> bool {
        match self {
            Self::Catalog(_) | Self::CartStore(_) | Self::Internal(_) => true,
            Self::Checkout(e) => matches!(
                e,
                CheckoutError::Http(_) | CheckoutError::Rejected { .. }
            ),
            Self::NotFound(_) | Self::BadRequest(_) => false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Catalog(_) => StatusCode::BAD_GATEWAY,
            Self::Checkout(err) => match err {
                CheckoutError::InvalidEmail(_)
                | CheckoutError::NameTooShort
                | CheckoutError::EmptyCart => StatusCode::BAD_REQUEST,
                CheckoutError::Http(_) | CheckoutError::Rejected { .. } => StatusCode::BAD_GATEWAY,
            },
            Self::CartStore(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients; validation errors
        // carry their own inline message.
        let message = match &self {
            Self::Catalog(_) => "Could not load products. Please try again.".to_string(),
            Self::Checkout(err) => match err {
                CheckoutError::Http(_) | CheckoutError::Rejected { .. } => {
                    "Could not submit the order. Please try again.".to_string()
                }
                _ => err.to_string(),
            },
            Self::CartStore(_) | Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
