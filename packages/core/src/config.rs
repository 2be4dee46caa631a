//! Content service configuration
//!
//! Settings are read from a JSON file. Every field has a default, so a partial
//! file (or none at all) yields a working configuration.
//!
//! # Location
//!
//! [`CourseConfig::load_or_default`] checks, in order:
//!
//! 1. the `COURSEWAY_CONFIG` environment variable
//! 2. `~/.courseway/config.json`
//!
//! and falls back to [`CourseConfig::default`] when neither file exists.

use crate::services::{CategoryCatalog, DEFAULT_CATEGORY_LINK_PREFIX};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "COURSEWAY_CONFIG";

const CONFIG_DIR: &str = ".courseway";
const CONFIG_FILE: &str = "config.json";

/// Upper bound for `order_persist_retries`; the last backoff is already ~10s
const MAX_PERSIST_RETRIES: usize = 10;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Content service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseConfig {
    /// Maximum number of quick-access pages returned
    #[serde(default = "default_quick_access_limit")]
    pub quick_access_limit: usize,

    /// Maximum number of recently updated pages returned
    #[serde(default = "default_recent_updates_limit")]
    pub recent_updates_limit: usize,

    /// Prefix of category listing links, e.g. `/categories/faq`
    #[serde(default = "default_category_link_prefix")]
    pub category_link_prefix: String,

    /// Retries on version conflict when saving a course order
    #[serde(default = "default_order_persist_retries")]
    pub order_persist_retries: usize,

    #[serde(default)]
    pub category_catalog: CategoryCatalog,
}

fn default_quick_access_limit() -> usize {
    5
}

fn default_recent_updates_limit() -> usize {
    4
}

fn default_category_link_prefix() -> String {
    DEFAULT_CATEGORY_LINK_PREFIX.to_string()
}

fn default_order_persist_retries() -> usize {
    3
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            quick_access_limit: default_quick_access_limit(),
            recent_updates_limit: default_recent_updates_limit(),
            category_link_prefix: default_category_link_prefix(),
            order_persist_retries: default_order_persist_retries(),
            category_catalog: CategoryCatalog::default(),
        }
    }
}

impl CourseConfig {
    /// Load and validate a config file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let config: Self = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from the default location, or return defaults if no file exists
    pub async fn load_or_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(path).await,
            Some(path) => {
                tracing::debug!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => {
                tracing::warn!("Could not determine home directory, using default configuration");
                Ok(Self::default())
            }
        }
    }

    /// `COURSEWAY_CONFIG` if set, else `~/.courseway/config.json`
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
            tracing::info!("Using config path from {}: {}", CONFIG_ENV_VAR, env_path);
            return Some(PathBuf::from(env_path));
        }

        dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Reject settings the service cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quick_access_limit == 0 {
            return Err(ConfigError::Invalid(
                "quick_access_limit must be greater than 0".to_string(),
            ));
        }
        if self.recent_updates_limit == 0 {
            return Err(ConfigError::Invalid(
                "recent_updates_limit must be greater than 0".to_string(),
            ));
        }
        if !self.category_link_prefix.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "category_link_prefix must start with '/': {:?}",
                self.category_link_prefix
            )));
        }
        if self.order_persist_retries > MAX_PERSIST_RETRIES {
            return Err(ConfigError::Invalid(format!(
                "order_persist_retries must be at most {}",
                MAX_PERSIST_RETRIES
            )));
        }
        Ok(())
    }
}
