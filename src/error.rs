//! Application error type and its HTTP representation.
//!
//! JSON failures use the envelope `{"status": <code>, "error": <message>}`
//! with the status mirrored in the HTTP status line. `404` and `405` are
//! plain-text responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::domain::repositories::StoreError;

/// JSON body for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request body could not be parsed as JSON.
    #[error("Invalid JSON")]
    InvalidJson,

    /// `url` is missing, not a string, or not an `http(s)://` URL.
    #[error("Invalid url")]
    InvalidUrl,

    /// Request body exceeds the buffering limit.
    #[error("Payload too large")]
    PayloadTooLarge,

    /// The threat checker flagged the URL.
    #[error("Unsafe url")]
    UnsafeUrl,

    /// The threat check failed and the registrar runs fail-closed.
    #[error("Threat check unavailable")]
    ThreatCheckUnavailable,

    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    #[error("Not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidJson | AppError::InvalidUrl | AppError::UnsafeUrl => {
                StatusCode::BAD_REQUEST
            }
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::ThreatCheckUnavailable | AppError::StoreUnavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Never carries internal detail.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::InvalidJson => "Invalid JSON",
            AppError::InvalidUrl => "Invalid url",
            AppError::UnsafeUrl => "Unsafe url",
            AppError::PayloadTooLarge => "Payload too large",
            AppError::ThreatCheckUnavailable => "Threat check unavailable",
            AppError::StoreUnavailable(_) => "Store unavailable",
            AppError::NotFound => "Not found",
            AppError::MethodNotAllowed => "Method not allowed",
            AppError::Internal(_) => "Internal error",
        }
    }
}

impl From<getrandom::Error> for AppError {
    fn from(e: getrandom::Error) -> Self {
        AppError::Internal(format!("OS random source failed: {}", e))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.public_message();

        match self {
            AppError::NotFound | AppError::MethodNotAllowed => (status, message).into_response(),
            other => {
                if status.is_server_error() {
                    tracing::error!("Request failed: {}", other);
                }

                let body = ErrorBody {
                    status: status.as_u16(),
                    error: message,
                };

                (status, Json(body)).into_response()
            }
        }
    }
}
