//! # Client configuration: `config.toml`
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000/api"
//! timeout_secs = 30
//!
//! [likes]
//! quota = 5
//!
//! [logging]
//! level = "warn"
//!
//! [storage]
//! session_file = "/home/me/.config/likeboard/session.json"
//! ```
//!
//! Every section and field is optional; a missing file is the default
//! configuration. Priority: CLI flags > environment > file > defaults.
//! Environment variables: `LIKEBOARD_API_URL`, `LIKEBOARD_LOG`.

use crate::paths::LikeboardPaths;
use likeboard_core::like::LIKE_QUOTA;
use likeboard_core::{LikeboardError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const ENV_API_URL: &str = "LIKEBOARD_API_URL";
pub const ENV_LOG: &str = "LIKEBOARD_LOG";

const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LikeboardConfig {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub likes: LikeSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub storage: StorageSettings,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout; 0 disables it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LikeSettings {
    #[serde(default = "default_quota")]
    pub quota: usize,
}

fn default_quota() -> usize {
    LIKE_QUOTA
}

impl Default for LikeSettings {
    fn default() -> Self {
        Self {
            quota: default_quota(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `tracing` filter directive, e.g. `warn` or `likeboard_application=debug`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Overrides the default `session.json` location.
    #[serde(default)]
    pub session_file: Option<PathBuf>,
}

impl LikeboardConfig {
    pub fn from_toml(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Applies environment overrides through `lookup`.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(level) = lookup(ENV_LOG).filter(|v| !v.trim().is_empty()) {
            self.logging.level = level;
        }
        self
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }
}

/// Loads [`LikeboardConfig`] from disk.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    paths: LikeboardPaths,
    path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new(paths: LikeboardPaths) -> Self {
        Self { paths, path: None }
    }

    /// Reads from an explicit file instead of the default location.
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }

    /// Loads the file (defaults when missing) and applies process env overrides.
    pub fn load(&self) -> Result<LikeboardConfig> {
        Ok(self.load_file()?.with_env(|key| std::env::var(key).ok()))
    }

    pub fn load_file(&self) -> Result<LikeboardConfig> {
        let path = self.config_path()?;

        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(LikeboardConfig::default());
        }

        let content = fs::read_to_string(&path)?;
        LikeboardConfig::from_toml(&content)
            .map_err(|e| LikeboardError::config(format!("{}: {}", path.display(), e)))
    }

    /// Location of the durable session store for `config`.
    pub fn session_file(&self, config: &LikeboardConfig) -> Result<PathBuf> {
        match &config.storage.session_file {
            Some(path) => Ok(path.clone()),
            None => self
                .paths
                .session_file()
                .map_err(|e| LikeboardError::config(e.to_string())),
        }
    }

    fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => self
                .paths
                .config_file()
                .map_err(|e| LikeboardError::config(e.to_string())),
        }
    }
}
