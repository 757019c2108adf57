//! Favorites store
//!
//! Ordered list of saved plants (deduplicated by scientific name) plus a
//! per-species popularity tally, persisted under two keys of one backend.
//!
//! Reads are lenient: a storage failure reads as empty/false/zero and is
//! logged. Writes are strict: any failure is returned, and the entries list
//! and counts map are always written together in one batch.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::error::StorageError;
use crate::models::{FavoriteEntry, IdentificationResult};
use crate::storage::StorageBackend;

/// Key holding the ordered favorites list
pub const FAVORITES_KEY: &str = "@plant_lens_favorites";

/// Key holding the scientific name → count map
pub const FAVORITE_COUNTS_KEY: &str = "@plant_lens_favorite_counts";

type FavoriteCounts = BTreeMap<String, u64>;

/// Favorites store over an injected backend
///
/// Clones share the backend and the write lock.
pub struct FavoritesStore<B: StorageBackend> {
    backend: Arc<B>,
    /// Serializes read-modify-write of entries + counts
    write_lock: Arc<Mutex<()>>,
}

impl<B: StorageBackend> Clone for FavoritesStore<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            write_lock: Arc::clone(&self.write_lock),
        }
    }
}

impl<B: StorageBackend> FavoritesStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Save a plant unless one with the same scientific name is present
    ///
    /// Returns `false` (and writes nothing) for a duplicate.
    pub async fn save(&self, plant: IdentificationResult) -> Result<bool, StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.load_entries().await?;
        if entries
            .iter()
            .any(|e| e.scientific_name() == plant.scientific_name)
        {
            tracing::debug!(scientific_name = %plant.scientific_name, "Favorite already saved");
            return Ok(false);
        }

        let mut counts = self.load_counts().await?;
        let key = plant.scientific_name.clone();
        *counts.entry(key.clone()).or_insert(0) += 1;

        entries.push(FavoriteEntry {
            plant,
            saved_at: plantlens_common::time::now(),
        });

        self.write(&entries, &counts).await?;

        tracing::info!(
            scientific_name = %key,
            count = counts.get(&key).copied().unwrap_or(0),
            favorites = entries.len(),
            "Favorite saved"
        );
        Ok(true)
    }

    /// Remove a favorite; always `Ok(true)`, including when nothing matched
    ///
    /// Use [`take`](Self::take) to learn whether an entry was removed.
    pub async fn remove(&self, scientific_name: &str) -> Result<bool, StorageError> {
        self.take(scientific_name).await?;
        Ok(true)
    }

    /// Remove a favorite and return it, or `None` if it was not saved
    ///
    /// An absent key is a no-op: nothing is written and counts are untouched.
    pub async fn take(&self, scientific_name: &str) -> Result<Option<FavoriteEntry>, StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.load_entries().await?;
        let Some(position) = entries
            .iter()
            .position(|e| e.scientific_name() == scientific_name)
        else {
            tracing::debug!(scientific_name, "Remove of unsaved favorite is a no-op");
            return Ok(None);
        };

        let removed = entries.remove(position);

        let mut counts = self.load_counts().await?;
        if let Some(count) = counts.get_mut(scientific_name) {
            *count = count.saturating_sub(1);
        }

        self.write(&entries, &counts).await?;

        tracing::info!(
            scientific_name,
            count = counts.get(scientific_name).copied().unwrap_or(0),
            favorites = entries.len(),
            "Favorite removed"
        );
        Ok(Some(removed))
    }

    /// Favorites in insertion order; empty on read failure
    pub async fn list(&self) -> Vec<FavoriteEntry> {
        match self.load_entries().await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read favorites, returning empty list");
                Vec::new()
            }
        }
    }

    /// Whether a plant is saved; false on read failure
    pub async fn contains(&self, scientific_name: &str) -> bool {
        match self.load_entries().await {
            Ok(entries) => entries
                .iter()
                .any(|e| e.scientific_name() == scientific_name),
            Err(e) => {
                tracing::warn!(error = %e, scientific_name, "Failed to check favorite status");
                false
            }
        }
    }

    /// Popularity count; absent keys and read failures read as 0
    pub async fn count_for(&self, scientific_name: &str) -> u64 {
        match self.load_counts().await {
            Ok(counts) => counts.get(scientific_name).copied().unwrap_or(0),
            Err(e) => {
                tracing::warn!(error = %e, scientific_name, "Failed to read favorite counts");
                0
            }
        }
    }

    async fn load_entries(&self) -> Result<Vec<FavoriteEntry>, StorageError> {
        self.load_json(FAVORITES_KEY).await
    }

    async fn load_counts(&self) -> Result<FavoriteCounts, StorageError> {
        self.load_json(FAVORITE_COUNTS_KEY).await
    }

    async fn load_json<T>(&self, key: &str) -> Result<T, StorageError>
    where
        T: DeserializeOwned + Default,
    {
        match self.backend.get(key).await? {
            None => Ok(T::default()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    async fn write(
        &self,
        entries: &[FavoriteEntry],
        counts: &FavoriteCounts,
    ) -> Result<(), StorageError> {
        let batch = vec![
            (FAVORITES_KEY.to_string(), serde_json::to_string(entries)?),
            (FAVORITE_COUNTS_KEY.to_string(), serde_json::to_string(counts)?),
        ];
        self.backend.write_batch(batch).await
    }
}
