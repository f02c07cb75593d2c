//! Target URL validation.
//!
//! A target is accepted on its scheme prefix, provided it can later be sent
//! back verbatim in a `Location` header. The URL is stored exactly as
//! submitted: no normalization, no trimming.

use axum::http::HeaderValue;

use crate::error::AppError;

/// Schemes a target URL may start with. Matched case-sensitively.
const ALLOWED_PREFIXES: &[&str] = &["http://", "https://"];

/// Validates a candidate target URL.
///
/// # Errors
///
/// Returns [`AppError::InvalidUrl`] if the URL is empty, does not begin
/// with `http://` or `https://`, or contains bytes a header value cannot
/// carry (CR, LF, other control characters).
///
/// # Examples
///
/// ```ignore
/// assert!(validate_target_url("https://example.com").is_ok());
/// assert!(validate_target_url("ftp://example.com").is_err());
/// ```
pub fn validate_target_url(url: &str) -> Result<(), AppError> {
    if !ALLOWED_PREFIXES.iter().any(|prefix| url.starts_with(prefix)) {
        return Err(AppError::InvalidUrl);
    }

    // Redirects echo the URL in `Location`
    HeaderValue::from_str(url).map_err(|_| AppError::InvalidUrl)?;

    Ok(())
}
