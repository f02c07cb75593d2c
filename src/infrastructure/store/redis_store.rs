//! Redis-backed store implementation.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info};

use crate::domain::repositories::{LinkStore, StoreError};

/// Redis store for short link mappings.
///
/// Uses connection pooling via `ConnectionManager` for efficient connection
/// reuse. Keys are namespaced with a `link:` prefix and never expire.
pub struct RedisStore {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: "link:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl LinkStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let redis_key = self.build_key(key);
        let mut conn = self.client.clone();

        conn.get::<_, Option<String>>(&redis_key).await.map_err(|e| {
            error!("Redis GET error for {}: {}", key, e);
            StoreError::from(e)
        })
    }

    async fn put_if_absent(&self, key: &str, target_url: &str) -> Result<bool, StoreError> {
        let redis_key = self.build_key(key);
        let mut conn = self.client.clone();

        let written = conn
            .set_nx::<_, _, bool>(&redis_key, target_url)
            .await
            .map_err(|e| {
                error!("Redis SETNX error for {}: {}", key, e);
                StoreError::from(e)
            })?;

        if written {
            debug!("Redis SETNX: {} -> {}", key, target_url);
        } else {
            debug!("Redis SETNX: {} already present", key);
        }

        Ok(written)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
