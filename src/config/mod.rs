//! Configuration loading.
//!
//! Layered sources, lowest precedence first: built-in defaults, the user
//! config file (`~/.config/reelvault/config.toml` unless an explicit path is
//! given), then environment variables (`REELVAULT__API__KEY` and friends).
//! The API key additionally falls back to `OMDB_API_KEY` for compatibility
//! with existing setups.

use crate::client::RetryPolicy;
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_retries() -> u32 {
    2
}

/// Remote metadata API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key; falls back to the OMDB_API_KEY environment variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Additional attempts after the first on transport failure.
    #[serde(default = "default_retries")]
    pub retries: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            key: None,
            timeout_secs: default_timeout_secs(),
            retries: default_retries(),
        }
    }
}

impl ApiConfig {
    pub fn resolve_api_key(&self) -> Result<String, ApiError> {
        self.key
            .clone()
            .or_else(|| std::env::var("OMDB_API_KEY").ok())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                ApiError::ConfigError(
                    "API key required (set api.key in config or OMDB_API_KEY env var)".to_string(),
                )
            })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            retries: self.retries,
            ..RetryPolicy::default()
        }
    }
}

/// Vault storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Vault file path; None means the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault_file: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the vault file location, defaulting to the platform data
    /// directory (`~/.local/share/reelvault/vault.txt` on Linux).
    pub fn resolve_vault_path(&self) -> Result<PathBuf, ApiError> {
        if let Some(path) = &self.vault_file {
            return Ok(path.clone());
        }
        let project_dirs = directories::ProjectDirs::from("", "reelvault", "reelvault")
            .ok_or_else(|| {
                ApiError::ConfigError(
                    "Could not determine platform data directory for the vault".to_string(),
                )
            })?;
        Ok(project_dirs.data_dir().join("vault.txt"))
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReelvaultConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the default file locations and environment.
    pub fn load() -> Result<ReelvaultConfig, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = Self::default_config_path() {
            builder = builder.add_source(File::from(path).required(false));
        }
        let builder = builder.add_source(Self::environment());
        builder.build()?.try_deserialize()
    }

    /// Load configuration from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<ReelvaultConfig, ConfigError> {
        let builder = Config::builder()
            .add_source(File::from(path.to_path_buf()))
            .add_source(Self::environment());
        builder.build()?.try_deserialize()
    }

    fn environment() -> Environment {
        Environment::with_prefix("REELVAULT")
            .separator("__")
            .try_parsing(true)
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "reelvault", "reelvault")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
