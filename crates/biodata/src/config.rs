//! Configuration management for biodata.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "biodata";

/// Default record store file name.
const DATA_FILE_NAME: &str = "db.json";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "BIODATA_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `BIODATA_`, sections split on `__`,
///    e.g. `BIODATA_SERVER__BIND`)
/// 2. TOML config file at `~/.config/biodata/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// HTTP server configuration.
    pub server: ServerConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the JSON record store.
    /// Defaults to `~/.local/share/biodata/db.json`
    pub data_path: Option<PathBuf>,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        Self::from_figment(Self::figment(&config_file))
    }

    /// The layered figment for a given config file.
    #[must_use]
    pub fn figment(config_file: &std::path::Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Extract and validate configuration from a figment.
    ///
    /// # Errors
    ///
    /// Returns an error if extraction or validation fails.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        self.bind_addr()?;

        if let Some(path) = &self.storage.data_path {
            let text = path.to_string_lossy();
            if text.is_empty()
                || text.ends_with('/')
                || text.ends_with(std::path::MAIN_SEPARATOR)
            {
                return Err(Error::ConfigValidation {
                    message: format!("storage.data_path must name a file: {text:?}"),
                });
            }
        }

        Ok(())
    }

    /// Get the record store path, resolving defaults if not set.
    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        self.storage
            .data_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATA_FILE_NAME))
    }

    /// Get the server bind address.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured address does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server.bind.parse().map_err(|_| Error::ConfigValidation {
            message: format!("server.bind is not a socket address: {}", self.server.bind),
        })
    }
}
