//! SQLite backend
//!
//! Values live in the `kv_store` table; batches are written in one
//! transaction.

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::path::Path;

use super::StorageBackend;
use crate::db;
use crate::error::StorageError;

#[derive(Debug, Clone)]
pub struct SqliteBackend {
    pool: SqlitePool,
}

impl SqliteBackend {
    /// Wrap an existing pool; `kv_store` must already exist
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (or create) the database file and its tables
    pub async fn open(db_path: &Path) -> Result<Self, StorageError> {
        let pool = db::init_database_pool(db_path)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        tracing::info!(path = %db_path.display(), "Favorites database opened");
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl StorageBackend for SqliteBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(db::kv::get_value(&self.pool, key).await?)
    }

    async fn write_batch(&self, entries: Vec<(String, String)>) -> Result<(), StorageError> {
        Ok(db::kv::set_values(&self.pool, &entries).await?)
    }
}
