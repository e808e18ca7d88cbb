//! Catalog API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//! A `.env` file in the working directory is read first when present.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use catalog_db::DbConfig;
use serde::{Deserialize, Serialize};

/// Catalog API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// HTTP server port
    pub port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Origins allowed by CORS, from a comma-separated `CORS_ORIGIN`
    pub cors_origins: Vec<String>,

    /// Maximum pooled connections
    pub db_max_connections: u32,

    /// Pool acquire timeout in seconds
    pub db_connect_timeout_secs: u64,

    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let config = CatalogConfig {
            port: var("PORT", "5000")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,

            database_path: PathBuf::from(var("DATABASE_PATH", "./catalog.db")),

            cors_origins: var("CORS_ORIGIN", "http://localhost:3000")
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),

            db_max_connections: var("DB_MAX_CONNECTIONS", "5")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()))?,

            db_connect_timeout_secs: var("DB_CONNECT_TIMEOUT_SECS", "30")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DB_CONNECT_TIMEOUT_SECS".to_string()))?,

            log_level: var("LOG_LEVEL", "info"),
        };

        if config.cors_origins.is_empty() {
            return Err(ConfigError::InvalidValue("CORS_ORIGIN".to_string()));
        }

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// Pool settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path)
            .max_connections(self.db_max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(self.db_connect_timeout_secs))
    }

    /// Listen address for the HTTP server.
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
