//! Unified error handling
//!
//! Application-level error type ([`AppError`]) and the error response
//! envelope ([`AppResponse`]). Success responses are bare payloads;
//! every failure serializes to the envelope with a stable code the
//! dashboard can dispatch on.
//!
//! Store-tier errors ([`StoreError`](crate::store::StoreError)) map
//! onto this enum at the boundary.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::store::StoreError;

/// Error response envelope
///
/// ```json
/// {
///   "code": "E0004",
///   "message": "Conflict: ..."
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse {
    pub code: String,
    pub message: String,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Auth errors (4xx) ==========
    #[error("Authentication required")]
    Unauthorized,

    // ========== Business errors (4xx) ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid request: {0}")]
    Invalid(String),

    // ========== System errors (5xx) ==========
    #[error("Storage not configured: {0}")]
    NotConfigured(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "E3001", "Please login first".to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E0004", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.clone()),
            AppError::Invalid(msg) => (StatusCode::BAD_REQUEST, "E0006", msg.clone()),
            AppError::NotConfigured(msg) => {
                error!(target: "storage", error = %msg, "Preferred tier not configured");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "E9003",
                    "Storage not configured".to_string(),
                )
            }
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9002",
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(AppResponse {
            code: code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotConfigured(msg) => AppError::NotConfigured(msg),
            StoreError::NotFound(msg) => AppError::NotFound(msg),
            StoreError::Conflict(msg) => AppError::Conflict(msg),
            StoreError::Validation(msg) => AppError::Validation(msg),
            StoreError::Database(msg) => AppError::Database(msg),
            StoreError::Io(e) => AppError::Internal(format!("I/O failure: {e}")),
            StoreError::Serde(e) => AppError::Internal(format!("Serialization failure: {e}")),
        }
    }
}
