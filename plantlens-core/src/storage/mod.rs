//! Durable key-value persistence for the favorites store
//!
//! Backends store opaque JSON blobs under string keys. A write made through a
//! backend must be visible to the next read of that key from the same process.

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;

use crate::error::StorageError;

pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

/// Key-value backend
#[async_trait]
pub trait StorageBackend: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write every entry or none of them
    async fn write_batch(&self, entries: Vec<(String, String)>) -> Result<(), StorageError>;
}
