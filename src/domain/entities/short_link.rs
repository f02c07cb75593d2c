//! Short link entity representing a key to URL mapping.

/// A registered short link.
///
/// Created once by [`crate::application::services::LinkRegistrar`] and never
/// updated or deleted. Its lifetime is the lifetime of the backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub key: String,
    pub target_url: String,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(key: String, target_url: String) -> Self {
        Self { key, target_url }
    }

    /// Redirect path for this link (`/` + key).
    pub fn path(&self) -> String {
        format!("/{}", self.key)
    }
}
