//! Key-value store backends for short link mappings.
//!
//! Provides three [`LinkStore`] implementations:
//! - [`MemoryStore`] - Process-local map (default)
//! - [`RedisStore`] - Redis with `SET NX`
//! - [`PgStore`] - PostgreSQL with `ON CONFLICT DO NOTHING`
//!
//! [`connect`] builds the backend selected by [`Config::store_backend`].

mod memory_store;
mod pg_store;
mod redis_store;

pub use memory_store::MemoryStore;
pub use pg_store::PgStore;
pub use redis_store::RedisStore;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::config::{Config, StoreBackend};
use crate::domain::repositories::LinkStore;

/// Connection attempts made before startup gives up.
const CONNECT_ATTEMPTS: usize = 5;

/// Builds the configured store backend.
///
/// Initial connections to Redis and PostgreSQL are retried with jittered
/// exponential backoff. PostgreSQL migrations are applied once connected.
///
/// # Errors
///
/// Returns an error if the backend URL is missing, every connection attempt
/// fails, or migrations fail.
pub async fn connect(config: &Config) -> Result<Arc<dyn LinkStore>> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::info!("Store: in-memory (mappings are lost on restart)");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Redis => {
            let redis_url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL must be set for the redis store")?;

            let store = Retry::spawn(backoff(), || RedisStore::connect(redis_url))
                .await
                .context("Failed to connect to Redis")?;

            tracing::info!("Store: Redis");
            Ok(Arc::new(store))
        }
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set for the postgres store")?;

            let pool = Retry::spawn(backoff(), || {
                PgPoolOptions::new()
                    .max_connections(config.db_max_connections)
                    .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
                    .idle_timeout(Duration::from_secs(config.db_idle_timeout))
                    .max_lifetime(Duration::from_secs(config.db_max_lifetime))
                    .connect(database_url)
            })
            .await
            .context("Failed to connect to database")?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to migrate")?;

            tracing::info!("Store: PostgreSQL");
            Ok(Arc::new(PgStore::new(Arc::new(pool))))
        }
    }
}

fn backoff() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(100)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(CONNECT_ATTEMPTS - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_is_bounded() {
        let delays: Vec<Duration> = backoff().collect();
        assert_eq!(delays.len(), CONNECT_ATTEMPTS - 1);
        assert!(delays.iter().all(|d| *d <= Duration::from_secs(5)));
    }

    #[tokio::test]
    async fn test_connect_memory_backend() {
        let config = Config::default();

        let store = connect(&config).await.unwrap();

        assert_eq!(store.backend_name(), "memory");
        assert!(store.health_check().await);
    }

    #[tokio::test]
    async fn test_connect_redis_without_url_fails() {
        let mut config = Config::default();
        config.store_backend = StoreBackend::Redis;
        config.redis_url = None;

        assert!(connect(&config).await.is_err());
    }
}
