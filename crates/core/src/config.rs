//! Client configuration
//!
//! Loaded from `config.toml` in the platform config directory; every field
//! has a default so a missing file means a plain local setup.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the Hearth backend
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Parse configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&raw)
            .map_err(|e| Error::Validation(format!("Invalid config: {}", e)))?;
        Ok(config)
    }

    /// Load from the default location, falling back to defaults if absent
    pub fn load_or_default() -> Self {
        match Self::default_path() {
            Ok(path) if path.exists() => match Self::load(&path) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to load config, using defaults");
                    Self::default()
                }
            },
            _ => {
                debug!("No config file, using defaults");
                Self::default()
            }
        }
    }

    /// Default config file location in the platform config directory
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "hearth", "hearth").ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}
