//! Configuration file loader for the `.botsmith/` directory structure.
//!
//! This module provides functionality to load and parse configuration from
//! the `.botsmith/` directory:
//! - `config.toml`: Backend connection settings

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::StudioConfig;
use std::path::Path;

/// Loads configuration from the `.botsmith/` directory.
///
/// # Arguments
///
/// * `root` - Root directory containing the `.botsmith/` folder
///
/// # Returns
///
/// A `StudioConfig` with all settings. A missing `.botsmith/` directory or
/// a missing `config.toml` yields the default configuration rather than an
/// error, so a fresh checkout talks to a local backend out of the box.
///
/// # Errors
///
/// Returns `ConfigError` if `config.toml` exists but cannot be read or has
/// invalid TOML syntax.
///
/// # Example
///
/// ```rust,no_run
/// use bs_core::config::loader::load_config;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("."))?;
/// println!("Backend at {}", config.backend.url);
/// # Ok(())
/// # }
/// ```
pub fn load_config(root: &Path) -> ConfigResult<StudioConfig> {
    let bs_dir = root.join(".botsmith");
    let config_path = bs_dir.join("config.toml");

    // If .botsmith or its config.toml doesn't exist, return default config
    if !config_path.exists() {
        return Ok(StudioConfig::default());
    }

    let content =
        std::fs::read_to_string(&config_path).map_err(|source| ConfigError::FileRead {
            path: config_path.clone(),
            source,
        })?;

    let config: StudioConfig =
        toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: config_path,
            source,
        })?;

    Ok(config)
}
