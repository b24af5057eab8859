//! Configuration System
//!
//! TOML-backed configuration for the harness itself (not the generator:
//! generator inputs arrive as build properties). Loaded from an explicit
//! `--config` path, otherwise from the user config file, otherwise
//! defaults.

use crate::error::HarnessError;
use crate::logging::LoggingConfig;
use config::{Config, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenrunConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration loader: explicit path or user config file.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from an explicit file path. The file must exist and parse.
    pub fn load_from_file(path: &Path) -> Result<GenrunConfig, HarnessError> {
        let settings = Config::builder()
            .add_source(File::from(path.to_path_buf()))
            .build()
            .map_err(|e| HarnessError::ConfigError(e.to_string()))?;
        settings
            .try_deserialize()
            .map_err(|e| HarnessError::ConfigError(e.to_string()))
    }

    /// Load from the user config file if present, defaults otherwise.
    pub fn load() -> Result<GenrunConfig, HarnessError> {
        let mut builder = Config::builder();
        if let Some(path) = Self::user_config_path() {
            if path.exists() {
                debug!(config_path = %path.display(), "loading user configuration");
                builder = builder.add_source(File::from(path).required(false));
            }
        }
        let settings = builder
            .build()
            .map_err(|e| HarnessError::ConfigError(e.to_string()))?;
        settings
            .try_deserialize()
            .map_err(|e| HarnessError::ConfigError(e.to_string()))
    }

    /// Path to the user config file
    /// ($XDG_CONFIG_HOME/genrun/config.toml or the platform equivalent).
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "genrun").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
