//! Handler for link registration endpoint.

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
};
use serde_json::Value;

use crate::api::dto::shorten::ShortenResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a URL under a new short key.
///
/// # Endpoint
///
/// `POST /`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// The body is parsed as JSON whatever the `Content-Type` header says.
///
/// # Response
///
/// ```json
/// { "status": 200, "key": "/aB3xY9" }
/// ```
///
/// # Errors
///
/// - 400 `Invalid JSON` if the body does not parse
/// - 400 `Invalid url` if `url` is missing, not a string, not `http(s)://`,
///   or not representable in a `Location` header
/// - 413 `Payload too large` if the body exceeds the request body limit
/// - 400 `Unsafe url` if the threat check flags the URL
/// - 503 `Threat check unavailable` if the check fails while running fail-closed
/// - 503 `Store unavailable` if the store cannot be reached
pub async fn shorten_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let body = body.map_err(body_error)?;
    let url = extract_url(&body)?;

    let link = state.registrar.register(url.as_str()).await?;

    Ok(Json(ShortenResponse::from(link)))
}

/// Maps a body buffering failure onto the JSON error envelope.
fn body_error(rejection: BytesRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::InvalidJson
    }
}

/// Pulls the `url` string field out of a JSON body.
fn extract_url(body: &[u8]) -> Result<String, AppError> {
    let payload: Value = serde_json::from_slice(body).map_err(|_| AppError::InvalidJson)?;

    payload
        .get("url")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(AppError::InvalidUrl)
}
