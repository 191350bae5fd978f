//! Configuration file loading and parsing.
//!
//! This module handles loading the configuration file from disk and parsing
//! it into validated, type-safe structures.
//!
//! # Configuration File Locations
//!
//! The configuration file is searched in the following order:
//!
//! 1. Path specified via `--config` CLI flag
//! 2. Default location:
//!    - **Linux/macOS:** `~/.chamber-packer/config.json`
//!    - **Windows:** `%USERPROFILE%\.chamber-packer\config.json`
//!
//! An explicit path must exist. When the default file is absent the built-in
//! defaults are used (base clearance 50 mm, `PURE` solvent bonus, 5 shelves).

mod settings;

pub use settings::{ClearanceConfig, Config, LoggingConfig, PackingConfig, ReportConfig};

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ConfigError;

/// Returns the default configuration directory.
///
/// - **Linux/macOS:** `~/.chamber-packer/`
/// - **Windows:** `%USERPROFILE%\.chamber-packer\`
#[must_use]
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".chamber-packer"))
}

/// Returns the platform-specific default configuration file path.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    default_config_dir().map(|p| p.join("config.json"))
}

/// Loads and parses the configuration file.
///
/// If `path` is `None`, uses the platform-specific default location, falling
/// back to [`Config::default`] when no file exists there.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given configuration file cannot be found
/// - The file cannot be read
/// - The JSON is malformed
/// - Required fields are missing or invalid
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ConfigError::NotFound {
                    path: p.to_path_buf(),
                });
            }
            p.to_path_buf()
        }
        None => match default_config_path().filter(|p| p.exists()) {
            Some(p) => p,
            None => return Ok(Config::default()),
        },
    };

    load_config_file(&config_path)
}

/// Reads, parses and validates a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
pub fn load_config_file(config_path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %config_path.display(), "Loading configuration");

    let contents = std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
        path: config_path.to_path_buf(),
        source: e,
    })?;

    let config: Config = serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: config_path.to_path_buf(),
        source: e,
    })?;

    // Validate the configuration
    config.validate()?;

    Ok(config)
}
