//! Configuration types for Skillbook.
//!
//! `ServiceConfig` mirrors `config.toml`. Every field has a default so a
//! partial (or missing) file is valid.

use serde::{Deserialize, Serialize};

/// Top-level service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// sqlx connection URL for the SQLite database.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub pagination: PaginationConfig,
}

fn default_database_url() -> String {
    "sqlite://database.db".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            server: ServerConfig::default(),
            pagination: PaginationConfig::default(),
        }
    }
}

/// Listen address for the HTTP API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Page sizes for list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Page size used when the request gives no `limit`.
    #[serde(default = "default_limit")]
    pub default_limit: u64,
    /// Upper bound applied to any requested `limit`.
    #[serde(default = "default_max_limit")]
    pub max_limit: u64,
}

fn default_limit() -> u64 {
    15
}

fn default_max_limit() -> u64 {
    100
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl PaginationConfig {
    /// Clamp a requested limit into `1..=max_limit`, falling back to the default.
    pub fn resolve_limit(&self, requested: Option<u64>) -> u64 {
        let max = self.max_limit.max(1);
        requested.unwrap_or(self.default_limit).clamp(1, max)
    }
}
