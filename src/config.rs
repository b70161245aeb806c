use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::version::registries::pypi::DEFAULT_PYPI_REGISTRY;

/// Directory name used under the config and data directories
pub const APP_NAME: &str = "pypi-versions";

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "PPV_LOG";

pub const LOG_FILE_NAME: &str = "pypi-versions.log";

/// Default request timeout in milliseconds (30 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Configuration file structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Base URL of the package index
    pub index_url: String,
    /// Include pre-release versions when listing
    pub include_prerelease: bool,
    /// Requests in flight at once; 1 resolves packages strictly one after another
    pub concurrency: usize,
    /// HTTP request timeout in milliseconds
    pub timeout_ms: u64,
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_PYPI_REGISTRY.to_string(),
            include_prerelease: false,
            concurrency: 1,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            log: LogConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `PPV_LOG` is not set
    pub level: String,
    /// Write log lines as JSON objects
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Config {
    /// Load the configuration file, falling back to defaults when it does not exist
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Returns the path to the configuration file.
/// Uses $XDG_CONFIG_HOME/pypi-versions if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/pypi-versions,
/// or ./pypi-versions if neither is available.
pub fn config_path() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir()).join("config.json")
}

/// Returns the path to the data directory, where log files are written.
/// Uses $XDG_DATA_HOME/pypi-versions if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/pypi-versions,
/// or ./pypi-versions if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    app_dir(xdg_config_home, home_dir, ".config")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    app_dir(xdg_data_home, home_dir, ".local/share")
}

fn app_dir(xdg_dir: Option<String>, home_dir: Option<PathBuf>, home_relative: &str) -> PathBuf {
    xdg_dir
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(home_relative)))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}
