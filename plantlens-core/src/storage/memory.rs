//! In-process backend
//!
//! Nothing survives the process. Useful for tests and ephemeral sessions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::StorageBackend;
use crate::error::StorageError;

#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the raw stored value (test inspection)
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .ok()
            .and_then(|values| values.get(key).cloned())
    }

    /// Overwrite a raw value, bypassing any store logic
    pub fn put_raw(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self
            .values
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    async fn write_batch(&self, entries: Vec<(String, String)>) -> Result<(), StorageError> {
        // Single lock acquisition makes the batch atomic for readers
        let mut values = self
            .values
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        values.extend(entries);
        Ok(())
    }
}
