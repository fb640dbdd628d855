//! CLI settings
//!
//! Loading priority:
//! 1. Command-line flags (applied by each command)
//! 2. Explicit `--config <path>` file, which must exist
//! 3. `seedbed.toml` in the working directory, when present
//! 4. Built-in defaults

use clap::ValueEnum;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "seedbed.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// Resolved settings for one invocation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// SQLite database file
    pub database: PathBuf,
    /// Directory uploaded media is copied into
    pub media_root: PathBuf,
    /// Seed dataset (JSON or YAML)
    pub data_file: PathBuf,
    /// Directory the dataset's file names are resolved against
    pub assets_dir: PathBuf,
    /// Scope of the first-run flag
    pub environment: String,
    pub log_format: LogFormat,
    pub server: ServerSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Socket address to listen on
    pub bind: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: PathBuf::from(".seedbed/store.db"),
            media_root: PathBuf::from(".seedbed/uploads"),
            data_file: PathBuf::from("data/data.json"),
            assets_dir: PathBuf::from("data/uploads"),
            environment: "development".to_string(),
            log_format: LogFormat::Pretty,
            server: ServerSettings::default(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:1337".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `explicit`, or from `seedbed.toml` if it exists
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
