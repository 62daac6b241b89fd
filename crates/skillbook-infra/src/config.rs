//! Configuration loader for Skillbook.
//!
//! Reads `config.toml` and deserializes it into [`ServiceConfig`]. Falls back
//! to defaults when the file is missing or malformed.

use std::path::{Path, PathBuf};

use skillbook_types::config::ServiceConfig;

/// Resolve which config file to read.
///
/// An explicit path (the `--config` flag or `SKILLBOOK_CONFIG`, both read by
/// the CLI) wins. Otherwise `~/.skillbook/config.toml`, or
/// `.skillbook/config.toml` relative to the current directory when no home
/// directory is known.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".skillbook").join("config.toml");
    }

    PathBuf::from(".skillbook").join("config.toml")
}

/// Load configuration from `config_path`.
///
/// - If the file does not exist, returns [`ServiceConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_config(config_path: &Path) -> ServiceConfig {
    let content = match tokio::fs::read_to_string(config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", config_path.display());
            return ServiceConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ServiceConfig::default();
        }
    };

    match toml::from_str::<ServiceConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ServiceConfig::default()
        }
    }
}
