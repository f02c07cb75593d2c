//! Store trait for short link persistence.

use async_trait::async_trait;

/// Errors raised by store backends.
///
/// Either variant is fatal for the request being served: no mapping can be
/// guaranteed read or written.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store connection error: {0}")]
    Connection(String),

    #[error("Store operation error: {0}")]
    Operation(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        if e.is_io_error() || e.is_connection_dropped() || e.is_connection_refusal() {
            StoreError::Connection(e.to_string())
        } else {
            StoreError::Operation(e.to_string())
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                StoreError::Connection(e.to_string())
            }
            other => StoreError::Operation(other.to_string()),
        }
    }
}

/// Key-value store holding key to target URL mappings.
///
/// The store is shared by every request handler and synchronizes access
/// itself. Keys are never updated or deleted through this interface.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::MemoryStore`] - Process-local map
/// - [`crate::infrastructure::store::RedisStore`] - Redis, `SET NX`
/// - [`crate::infrastructure::store::PgStore`] - PostgreSQL, `ON CONFLICT DO NOTHING`
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Looks up the target URL stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if the key exists
    /// - `Ok(None)` if it does not
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `key -> target_url` only if `key` is not already present.
    ///
    /// The check and the write are a single atomic step, so of several
    /// concurrent callers racing on one key exactly one gets `Ok(true)`.
    /// An existing mapping is never modified.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the mapping was written
    /// - `Ok(false)` if the key already existed
    async fn put_if_absent(&self, key: &str, target_url: &str) -> Result<bool, StoreError>;

    /// Checks whether the backend is reachable.
    async fn health_check(&self) -> bool;

    /// Backend name for logs and health reports.
    fn backend_name(&self) -> &'static str;
}
