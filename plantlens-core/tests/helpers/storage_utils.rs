//! Storage test utilities

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::atomic::{AtomicBool, Ordering};

use plantlens_core::error::StorageError;
use plantlens_core::storage::{MemoryBackend, SqliteBackend, StorageBackend};

/// In-memory SQLite backend with tables initialized
pub async fn create_test_sqlite() -> SqliteBackend {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .unwrap();
    plantlens_core::db::init_tables(&pool).await.unwrap();
    SqliteBackend::new(pool)
}

/// Memory backend whose reads and writes can be made to fail
#[derive(Default)]
pub struct FailingBackend {
    pub inner: MemoryBackend,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FailingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl StorageBackend for FailingBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("injected read failure".to_string()));
        }
        self.inner.get(key).await
    }

    async fn write_batch(&self, entries: Vec<(String, String)>) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("injected write failure".to_string()));
        }
        self.inner.write_batch(entries).await
    }
}
