//! Configuration wiring for plantlens-core
//!
//! Turns a resolved `TomlConfig` into ready-to-use components.

use plantlens_common::config::{self, TomlConfig};
use plantlens_common::{Error, Result};

use crate::services::{EncyclopediaClient, FavoritesStore};
use crate::storage::SqliteBackend;

/// Load configuration from the default location (or `PLANTLENS_CONFIG`)
///
/// A missing file yields defaults; a malformed one is an error.
pub fn load_config() -> Result<TomlConfig> {
    let path = config::config_file_path()?;
    config::load_or_default(&path)
}

/// Open the SQLite-backed favorites store named by the config
pub async fn open_favorites_store(config: &TomlConfig) -> Result<FavoritesStore<SqliteBackend>> {
    let db_path = config.storage.resolved_database_path();
    let backend = SqliteBackend::open(&db_path)
        .await
        .map_err(|e| Error::Internal(format!("Failed to open favorites database: {}", e)))?;
    Ok(FavoritesStore::new(backend))
}

/// Build the encyclopedia client; shares the provider API key
pub fn encyclopedia_client(config: &TomlConfig) -> Result<EncyclopediaClient> {
    let api_key = config::resolve_api_key(config)?;
    EncyclopediaClient::new(config.encyclopedia.base_url.clone(), api_key)
        .map_err(|e| Error::Internal(e.to_string()))
}
