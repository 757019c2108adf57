//! Tracing initialization
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to the
//! PlantLens crates.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Build the filter directive used when `RUST_LOG` is unset
pub fn default_directive(level: &str) -> String {
    format!("plantlens_core={level},plantlens_common={level}")
}

/// Install the global tracing subscriber
///
/// Returns `false` if a subscriber was already installed (e.g. by another test).
pub fn init_tracing(config: &LoggingConfig) -> bool {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.level))),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_covers_both_crates() {
        let directive = default_directive("debug");
        assert_eq!(directive, "plantlens_core=debug,plantlens_common=debug");
    }

    #[test]
    fn test_init_tracing_is_idempotent() {
        let config = LoggingConfig::default();
        let _ = init_tracing(&config);
        // Second install must not panic
        assert!(!init_tracing(&config));
    }
}
