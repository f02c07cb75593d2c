//! Permissive CORS for browser clients.

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::Response,
};

const ALLOW_ORIGIN: &str = "*";
const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type";

/// Answers preflights and decorates registration responses.
///
/// # Behavior
///
/// - `OPTIONS` on any path: `204 No Content` with CORS headers, the request
///   never reaches a handler
/// - `POST`: the handler's response (success or error) gets CORS headers
/// - anything else passes through untouched
///
/// # Headers
///
/// ```text
/// Access-Control-Allow-Origin: *
/// Access-Control-Allow-Methods: GET, POST, OPTIONS
/// Access-Control-Allow-Headers: Content-Type
/// ```
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/", post(shorten_handler))
///     .layer(middleware::from_fn(cors::layer));
/// ```
pub async fn layer(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        let mut response = Response::new(Body::empty());
        *response.status_mut() = StatusCode::NO_CONTENT;
        apply_headers(response.headers_mut());
        return response;
    }

    let is_post = req.method() == Method::POST;
    let mut response = next.run(req).await;

    if is_post {
        apply_headers(response.headers_mut());
    }

    response
}

fn apply_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
}
