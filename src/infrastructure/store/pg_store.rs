//! PostgreSQL implementation of the link store.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::domain::repositories::{LinkStore, StoreError};

/// PostgreSQL store for short link mappings.
///
/// Backed by the `short_links` table (see `migrations/`). The primary key on
/// `key` makes `INSERT ... ON CONFLICT DO NOTHING` an atomic put-if-absent.
pub struct PgStore {
    pool: Arc<PgPool>,
}

impl PgStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkStore for PgStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT target_url
            FROM short_links
            WHERE key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(|r| r.try_get::<String, _>("target_url"))
            .transpose()
            .map_err(StoreError::from)
    }

    async fn put_if_absent(&self, key: &str, target_url: &str) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO short_links (key, target_url)
            VALUES ($1, $2)
            ON CONFLICT (key) DO NOTHING
            "#,
        )
        .bind(key)
        .bind(target_url)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
