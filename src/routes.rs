//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /`        - Register a URL
//! - `GET  /{key}`   - Short link redirect
//! - `GET  /health`  - Health check: store, threat check
//! - `OPTIONS *`     - CORS preflight
//!
//! Unrouted `GET` paths are `404`; unsupported methods are `405`.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging (outermost, so
//!   preflights are traced too)
//! - **CORS** - Preflight answers and POST response headers

use crate::api;
use crate::api::handlers::fallback_handler;
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::{Router, middleware};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    api::routes::link_routes()
        .fallback(fallback_handler)
        .with_state(state)
        .layer(middleware::from_fn(cors::layer))
        .layer(tracing::layer())
}
