//! Handler for short key redirect.

use axum::{
    extract::State,
    http::{HeaderValue, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short key to its target URL.
///
/// # Endpoint
///
/// `GET /{key}`
///
/// Looks the key up in the store and answers `302 Found` with the stored URL
/// in `Location`. Every lookup goes to the store; there is no cache.
///
/// The key is the raw path segment: no percent-decoding, so `/%41B3xY9`
/// looks up `%41B3xY9`, not `AB3xY9`.
///
/// # Errors
///
/// - 404 `Not found` if the key is unknown
/// - 503 `Store unavailable` if the store cannot be reached
pub async fn redirect_handler(
    uri: Uri,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let key = raw_key(&uri);

    let Some(target_url) = state.store.get(key).await? else {
        metrics::counter!("redirects_total", "outcome" => "not_found").increment(1);
        debug!(key = %key, "Unknown key");
        return Err(AppError::NotFound);
    };

    let location = HeaderValue::from_str(&target_url).map_err(|e| {
        warn!(key = %key, error = %e, "Stored URL is not a valid header value");
        AppError::internal(format!("invalid Location for key {}: {}", key, e))
    })?;

    metrics::counter!("redirects_total", "outcome" => "found").increment(1);

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Path segment after the leading `/`, as sent on the wire.
fn raw_key(uri: &Uri) -> &str {
    let path = uri.path();
    path.strip_prefix('/').unwrap_or(path)
}
