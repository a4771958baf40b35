//! Configuration management for listkeeper
//!
//! This module handles loading, parsing, and validation of configuration files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

/// Storage backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend to use: "memory" (session-scoped) or "database"
    pub backend: String,
    /// Connection URL for the database backend, e.g.
    /// `postgres://localhost/todos` or `sqlite://todos.db?mode=rwc`
    pub database_url: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging
    pub enabled: bool,
    /// Log level: "error", "warn", "info", "debug" or "trace"
    pub level: String,
    /// Optional log file; stdout is always on when logging is enabled
    pub file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            database_url: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from file or return defaults, then apply
    /// environment overrides and validate
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        let mut config = if let Some(path) = config_path {
            Self::load_from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("listkeeper.toml");
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("listkeeper").join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Environment variables win over the config file. `DATABASE_URL` (or the
    /// namespaced `LISTKEEPER_DATABASE_URL`) sets the connection string;
    /// `LISTKEEPER_BACKEND` picks the backend.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(backend) = std::env::var("LISTKEEPER_BACKEND") {
            self.storage.backend = backend;
        }
        if let Ok(url) = std::env::var("LISTKEEPER_DATABASE_URL") {
            self.storage.database_url = Some(url);
        } else if let Ok(url) = std::env::var("DATABASE_URL") {
            self.storage.database_url = Some(url);
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        match self.storage.backend.as_str() {
            "memory" => {}
            "database" => {
                if self.storage.database_url.is_none() {
                    anyhow::bail!(
                        "storage.database_url must be set when the database backend is selected"
                    );
                }
            }
            other => {
                anyhow::bail!("Unknown storage backend '{}'. Available backends: memory, database", other);
            }
        }

        if self.server.port == 0 {
            anyhow::bail!("server.port must be non-zero");
        }

        if self.logging.level.parse::<log::LevelFilter>().is_err() {
            anyhow::bail!(
                "Invalid logging level '{}'. Use error, warn, info, debug or trace",
                self.logging.level
            );
        }

        Ok(())
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }
}
