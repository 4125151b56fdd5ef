use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub tmdb: TmdbConfig,
}

/// Where the cinelog REST backend lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
}

/// TMDB metadata provider settings. The API key is sent as a query
/// parameter on every metadata call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    pub base_url: String,
    pub api_key: String,
}

impl AppConfig {
    /// Load config: user file (if exists) over built-in defaults.
    pub fn load() -> Result<Self, CoreError> {
        let user_path = Self::config_path();
        if user_path.exists() {
            let user_str =
                std::fs::read_to_string(&user_path).map_err(|e| CoreError::Config(e.to_string()))?;
            toml::from_str(&user_str).map_err(|e| CoreError::Config(e.to_string()))
        } else {
            toml::from_str(DEFAULT_CONFIG).map_err(|e| CoreError::Config(e.to_string()))
        }
    }

    /// Save current config to the user config file.
    pub fn save(&self) -> Result<(), CoreError> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CoreError::Config(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Path to the user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "cinelog")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}
