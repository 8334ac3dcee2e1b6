// src/adapters/postgres.rs
use crate::{KvStore, WalletError};
use async_trait::async_trait;
use sqlx::Row;

pub trait PostgresWalletAdapter {
    fn get_pool(&self) -> sqlx::PgPool;
}

#[async_trait]
pub trait PostgresSchemaWalletAdapter {
    /// Initialize the snapshot table for the wallet store.
    /// Call once at deployment, before the first read or write.
    async fn init_wallet_schema(&self) -> Result<(), WalletError>;
}

#[async_trait]
impl<T> PostgresSchemaWalletAdapter for T
where
    T: PostgresWalletAdapter + Send + Sync,
{
    async fn init_wallet_schema(&self) -> Result<(), WalletError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS wallet_snapshots (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.get_pool())
        .await
        .map_err(|e| WalletError::Storage(e.to_string()))?;

        Ok(())
    }
}

/// Postgres-backed key-value store: one row per snapshot key, writes are
/// whole-value upserts.
pub struct PostgresKv {
    pool: sqlx::PgPool,
}

impl PostgresKv {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

impl PostgresWalletAdapter for PostgresKv {
    fn get_pool(&self) -> sqlx::PgPool {
        self.pool.clone()
    }
}

#[async_trait]
impl KvStore for PostgresKv {
    async fn get(&self, key: &str) -> Result<Option<String>, WalletError> {
        let row = sqlx::query("SELECT value FROM wallet_snapshots WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| WalletError::Storage(e.to_string()))?;

        Ok(row.map(|r| r.get::<String, _>("value")))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), WalletError> {
        sqlx::query(
            r#"
            INSERT INTO wallet_snapshots (key, value, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| WalletError::Storage(e.to_string()))?;

        Ok(())
    }

    async fn remove_prefix(&self, prefix: &str) -> Result<(), WalletError> {
        // starts_with, not LIKE: key prefixes contain `_`, which LIKE
        // treats as a wildcard
        sqlx::query("DELETE FROM wallet_snapshots WHERE starts_with(key, $1)")
            .bind(prefix)
            .execute(&self.pool)
            .await
            .map_err(|e| WalletError::Storage(e.to_string()))?;

        Ok(())
    }
}
