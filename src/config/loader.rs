#![warn(clippy::all, clippy::pedantic)]

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::{Config, ConfigError};

// Fallback config file path when no platform config directory exists
const CONFIG_FILE_PATH: &str = "config/stackfall.toml";

// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "STACKFALL_CONFIG";

/// Loads `path`, writing a default config there first if it does not exist.
///
/// Fields missing from the file take their default values.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] when the file cannot be read or created and
/// [`ConfigError::Parse`] for malformed TOML.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        info!("No config at {}, writing defaults", path.display());
        let default_config = Config::default();
        save_config_to(path, &default_config)?;
        return Ok(default_config);
    }

    let contents = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Writes `config` as TOML, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] or [`ConfigError::Serialize`].
pub fn save_config_to(path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let toml_string = toml::to_string_pretty(config)?;
    fs::write(path, toml_string)?;
    Ok(())
}

// Get the path to the config file
#[must_use]
pub fn get_config_file_path() -> PathBuf {
    // Check for environment variable override
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }

    // Otherwise use default path in user's config directory
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("stackfall").join("config.toml")
    } else {
        // Fallback to local directory
        PathBuf::from(CONFIG_FILE_PATH)
    }
}
