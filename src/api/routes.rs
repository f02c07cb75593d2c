//! Link route configuration.

use crate::api::handlers::{
    health_handler, method_not_allowed_handler, not_found_handler, redirect_handler,
    shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public link routes.
///
/// # Endpoints
///
/// - `POST /`        - Register a URL
/// - `GET  /`        - 404 (no key)
/// - `GET  /health`  - Health report
/// - `GET  /{key}`   - Redirect to the stored URL
///
/// Other methods on these paths answer `405 Method not allowed`.
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(shorten_handler)
                .get(not_found_handler)
                .fallback(method_not_allowed_handler),
        )
        .route(
            "/health",
            get(health_handler).fallback(method_not_allowed_handler),
        )
        .route(
            "/{key}",
            get(redirect_handler).fallback(method_not_allowed_handler),
        )
}
