//! Configuration file loading for the CLI
//!
//! This module handles finding, loading and validating TOML configuration
//! files from various locations (explicit path, local directory, system
//! directory).

use std::{
    fs, iter,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use weekgrid::{WeekgridError, config::AppConfig};

const CONFIG_FILE_NAME: &str = "config.toml";
const LOCAL_CONFIG_PATH: &str = "weekgrid/config.toml";

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for WeekgridError {
    fn from(err: ConfigError) -> Self {
        WeekgridError::Io(std::io::Error::other(err.to_string()))
    }
}

/// Find, load and validate configuration
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (weekgrid/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
/// - The loaded configuration fails validation
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, WeekgridError> {
    let config = find_config(explicit_path)?;
    config.validate().map_err(ConfigError::Validation)?;
    debug!(config:?; "Configuration loaded");
    Ok(config)
}

fn find_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, WeekgridError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let system_config = ProjectDirs::from("com", "weekgrid", "weekgrid")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME));
    if system_config.is_none() {
        debug!("Could not determine platform-specific config directory");
    }

    let candidates = iter::once(PathBuf::from(LOCAL_CONFIG_PATH)).chain(system_config);
    for candidate in candidates {
        if candidate.exists() {
            info!(path = candidate.display().to_string(); "Loading configuration");
            return load_config_file(&candidate);
        }
        debug!(path = candidate.display().to_string(); "Configuration file not found");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - TOML parsing fails
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, WeekgridError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    Ok(config)
}
