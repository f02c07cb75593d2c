//! Handlers for paths and methods nothing else matches.

use axum::http::Method;

use crate::error::AppError;

/// `404 Not found` for paths with no route.
pub async fn not_found_handler() -> AppError {
    AppError::NotFound
}

/// `405 Method not allowed` for unsupported methods on a known path.
pub async fn method_not_allowed_handler() -> AppError {
    AppError::MethodNotAllowed
}

/// Router-wide fallback.
///
/// Reads on unrouted paths (`/a/b`, ...) are `404`; any other method is `405`.
pub async fn fallback_handler(method: Method) -> AppError {
    if method == Method::GET || method == Method::HEAD {
        AppError::NotFound
    } else {
        AppError::MethodNotAllowed
    }
}
