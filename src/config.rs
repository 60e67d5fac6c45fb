//! Configuration module
//!
//! Settings load from a TOML file (default `~/.config/rental-booking/
//! config.toml`, overridable via the `BOOKING_CONFIG` env var). Every
//! section falls back to usable development defaults when absent.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub collaborators: CollaboratorConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address for the REST API
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8084,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Database URL (e.g., "sqlite://./rental.db?mode=rwc")
    pub url: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://./rental.db?mode=rwc".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollaboratorConfig {
    /// Base URL of the user service
    pub user_service_url: String,
    /// Base URL of the vehicle service
    pub vehicle_service_url: String,
    /// Timeout for each outbound collaborator call, in seconds
    pub request_timeout_secs: u64,
}

impl CollaboratorConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for CollaboratorConfig {
    fn default() -> Self {
        Self {
            user_service_url: "http://localhost:8081".to_string(),
            vehicle_service_url: "http://localhost:8082".to_string(),
            request_timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// tracing filter directive, e.g. "info" or "rental_booking=debug"
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

/// Default config file location under the user's config directory.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rental-booking")
        .join("config.toml")
}

// ── Tests ──────────────────────────────────────────────────────
