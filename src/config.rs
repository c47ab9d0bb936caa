//! Configuration module
//!
//! TOML-backed application configuration with sane defaults. The file
//! lives at `~/.config/congestion-tax/config.toml` unless overridden via
//! the `CONGESTION_TAX_CONFIG` environment variable.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::TaxPolicy;

/// Errors while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter, overridable via `RUST_LOG`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Billing limits; defaults are the canonical 2013 values.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TaxConfig {
    /// Cap on the summed fee for one calendar day
    pub daily_maximum: u32,
    /// Single-charge grouping window in minutes
    pub single_charge_window_minutes: i64,
}

impl Default for TaxConfig {
    fn default() -> Self {
        let policy = TaxPolicy::default();
        Self {
            daily_maximum: policy.daily_maximum,
            single_charge_window_minutes: policy.single_charge_window_minutes,
        }
    }
}

impl TaxConfig {
    pub fn policy(&self) -> TaxPolicy {
        TaxPolicy {
            daily_maximum: self.daily_maximum,
            single_charge_window_minutes: self.single_charge_window_minutes,
        }
    }
}

/// Application configuration loaded from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub tax: TaxConfig,
}

impl AppConfig {
    /// Load configuration from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("congestion-tax")
        .join("config.toml")
}
