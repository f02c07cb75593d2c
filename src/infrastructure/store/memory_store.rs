//! In-memory store implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::repositories::{LinkStore, StoreError};

/// Process-local store backed by a `HashMap`.
///
/// Mappings are lost when the process exits. Used for development, tests,
/// and single-instance deployments that do not need durability.
#[derive(Default)]
pub struct MemoryStore {
    links: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        debug!("Using MemoryStore (mappings are not persisted)");
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            links: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Number of stored mappings.
    pub async fn len(&self) -> usize {
        self.links.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.links.read().await.is_empty()
    }
}

#[async_trait]
impl LinkStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.links.read().await.get(key).cloned())
    }

    async fn put_if_absent(&self, key: &str, target_url: &str) -> Result<bool, StoreError> {
        let mut links = self.links.write().await;

        if links.contains_key(key) {
            return Ok(false);
        }

        links.insert(key.to_string(), target_url.to_string());
        Ok(true)
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
