//! Error types and Axum response conversions.

use crate::catalog::CatalogError;
use crate::storage::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application error types.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Store(StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Internal(msg) => {
                // Log detailed error server-side, return generic message to client
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Config(msg) => {
                // Never tell the client which value is missing
                tracing::error!(error = %msg, "Configuration error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server configuration error".to_string(),
                )
            }
            AppError::Store(err) => {
                tracing::error!(error = %err, "Document store error");
                let msg = match err {
                    StoreError::Conflict(_) => {
                        "Remote document was modified concurrently; retry the operation"
                    }
                    _ => "Document store request failed",
                };
                (StatusCode::INTERNAL_SERVER_ERROR, msg.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// Convenience conversions from layered module errors

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            // Missing repository credentials are a deployment problem,
            // not an upstream failure
            StoreError::NotConfigured => {
                AppError::Config("GitHub repository access is not configured".to_string())
            }
            other => AppError::Store(other),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(msg) => AppError::BadRequest(msg),
            CatalogError::NotFound(_) => AppError::NotFound("Link not found".to_string()),
            CatalogError::Store(e) => AppError::from(e),
        }
    }
}
