//! DTOs for the link registration endpoint.

use serde::Serialize;

use crate::domain::entities::ShortLink;

/// Successful registration: `{"status": 200, "key": "/<key>"}`.
///
/// `key` is the path of the short link, leading slash included, so clients
/// can append it to whatever host they reached the service on.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub status: u16,
    pub key: String,
}

impl From<ShortLink> for ShortenResponse {
    fn from(link: ShortLink) -> Self {
        Self {
            status: 200,
            key: link.path(),
        }
    }
}
