// Game configuration loaded from an optional RON file

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::game::tuning::DrivingTuning;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "car-game.ron";

/// Environment variable overriding the config file path
pub const CONFIG_PATH_ENV: &str = "CAR_GAME_CONFIG";

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Window settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Points: 0".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Top-level game configuration
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub tuning: DrivingTuning,
    /// Seed for collectible placement; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Parse a configuration from RON text
    pub fn from_ron_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a configuration file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&text, path)
    }

    /// Load a configuration file, falling back to defaults
    ///
    /// A missing file is not an error. Any other failure is returned
    /// alongside the defaults so the caller can report it.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<ConfigError>) {
        let path = path.as_ref();
        if !path.exists() {
            return (Self::default(), None);
        }
        match Self::load_from_file(path) {
            Ok(config) => (config, None),
            Err(err) => (Self::default(), Some(err)),
        }
    }

    /// Resolve the config path from the environment or the default location
    pub fn resolve_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }
}
