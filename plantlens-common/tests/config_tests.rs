//! Unit tests for configuration loading and API key resolution
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate PLANTLENS_API_KEY or PLANTLENS_CONFIG are marked
//! with #[serial].

use plantlens_common::config::{
    config_file_path, is_valid_key, load_or_default, load_toml_config, resolve_api_key,
    write_toml_config, ProviderConfig, TomlConfig, API_KEY_ENV, CONFIG_PATH_ENV,
    DEFAULT_IDENTIFY_URL, DEFAULT_TIMEOUT_SECS,
};
use plantlens_common::Error;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_defaults() {
    let config = TomlConfig::default();
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.provider.identify_url, DEFAULT_IDENTIFY_URL);
    assert_eq!(config.provider.timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert!(config.provider.api_key.is_none());
    assert!(config.storage.database_path.is_none());
}

#[test]
fn test_partial_toml_fills_defaults() {
    let toml_str = r#"
        [provider]
        api_key = "abc"
    "#;
    let config: TomlConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(config.provider.api_key.as_deref(), Some("abc"));
    assert_eq!(config.provider.timeout_secs, 30);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_empty_toml_is_default() {
    let config: TomlConfig = toml::from_str("").unwrap();
    assert_eq!(config, TomlConfig::default());
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nope.toml");
    let config = load_or_default(&path).unwrap();
    assert_eq!(config, TomlConfig::default());
}

#[test]
fn test_malformed_file_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.toml");
    std::fs::write(&path, "[provider\napi_key = ").unwrap();

    let result = load_or_default(&path);
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_write_then_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.toml");

    let mut config = TomlConfig::default();
    config.provider = ProviderConfig {
        api_key: Some("written-key".to_string()),
        identify_url: "http://localhost:9000/identify".to_string(),
        timeout_secs: 5,
    };
    config.storage.database_path = Some(PathBuf::from("/tmp/plantlens-test.db"));

    write_toml_config(&config, &path).unwrap();
    assert!(path.exists());
    assert!(!path.with_extension("toml.tmp").exists());

    let loaded = load_toml_config(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_resolved_database_path_prefers_explicit() {
    let mut config = TomlConfig::default();
    assert!(config
        .storage
        .resolved_database_path()
        .ends_with("plantlens.db"));

    config.storage.database_path = Some(PathBuf::from("/data/favs.db"));
    assert_eq!(
        config.storage.resolved_database_path(),
        PathBuf::from("/data/favs.db")
    );
}

#[test]
fn test_is_valid_key() {
    assert!(is_valid_key("k"));
    assert!(!is_valid_key(""));
    assert!(!is_valid_key("   \t"));
}

#[test]
#[serial]
fn test_resolve_api_key_env_wins() {
    env::set_var(API_KEY_ENV, "env-key");
    let mut config = TomlConfig::default();
    config.provider.api_key = Some("toml-key".to_string());

    assert_eq!(resolve_api_key(&config).unwrap(), "env-key");

    env::remove_var(API_KEY_ENV);
}

#[test]
#[serial]
fn test_resolve_api_key_toml_fallback() {
    env::remove_var(API_KEY_ENV);
    let mut config = TomlConfig::default();
    config.provider.api_key = Some("toml-key".to_string());

    assert_eq!(resolve_api_key(&config).unwrap(), "toml-key");
}

#[test]
#[serial]
fn test_resolve_api_key_ignores_blank_env() {
    env::set_var(API_KEY_ENV, "  ");
    let mut config = TomlConfig::default();
    config.provider.api_key = Some("toml-key".to_string());

    assert_eq!(resolve_api_key(&config).unwrap(), "toml-key");

    env::remove_var(API_KEY_ENV);
}

#[test]
#[serial]
fn test_resolve_api_key_missing() {
    env::remove_var(API_KEY_ENV);
    let result = resolve_api_key(&TomlConfig::default());
    match result {
        Err(Error::Config(msg)) => assert!(msg.contains(API_KEY_ENV)),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_config_file_path_env_override() {
    env::set_var(CONFIG_PATH_ENV, "/tmp/plantlens-custom.toml");
    assert_eq!(
        config_file_path().unwrap(),
        PathBuf::from("/tmp/plantlens-custom.toml")
    );
    env::remove_var(CONFIG_PATH_ENV);
}
