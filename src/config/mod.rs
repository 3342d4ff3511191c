pub mod controls;
pub mod loader;
pub mod palette;

use std::fmt;
use std::io;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::game::{
    BOARD_HEIGHT, BOARD_WIDTH, DROP_INTERVAL_MS, MAX_BOARD_HEIGHT, MAX_BOARD_WIDTH,
    MIN_BOARD_HEIGHT, MIN_BOARD_WIDTH, MIN_DROP_INTERVAL_MS,
};
use crate::input::{Command, KeyBindings};
use controls::ControlsConfig;
use palette::{ColorConfig, Palette};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub board: BoardConfig,
    pub controls: ControlsConfig,
    pub colors: ColorConfig,
}

// Playfield size and drop pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
    pub drop_interval_ms: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            drop_interval_ms: DROP_INTERVAL_MS,
        }
    }
}

/// Everything gameplay needs, checked and converted from a [`Config`].
#[derive(Debug, Clone)]
pub struct GameSettings {
    pub width: usize,
    pub height: usize,
    pub drop_interval: Duration,
    pub bindings: KeyBindings,
    pub palette: Palette,
}

impl Default for GameSettings {
    fn default() -> Self {
        Config::default()
            .validate()
            .unwrap_or_else(|e| unreachable!("built-in configuration is invalid: {e}"))
    }
}

impl Config {
    /// Checks every section and builds the runtime settings.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: out-of-range dimensions or interval,
    /// an unknown or doubly-assigned key, or a palette that does not cover
    /// exactly the block keys.
    pub fn validate(&self) -> Result<GameSettings, ConfigError> {
        let BoardConfig {
            width,
            height,
            drop_interval_ms,
        } = self.board;

        if !(MIN_BOARD_WIDTH..=MAX_BOARD_WIDTH).contains(&width)
            || !(MIN_BOARD_HEIGHT..=MAX_BOARD_HEIGHT).contains(&height)
        {
            return Err(ConfigError::InvalidDimensions { width, height });
        }
        if drop_interval_ms < MIN_DROP_INTERVAL_MS {
            return Err(ConfigError::InvalidInterval(drop_interval_ms));
        }

        Ok(GameSettings {
            width,
            height,
            drop_interval: Duration::from_millis(drop_interval_ms),
            bindings: KeyBindings::from_config(&self.controls)?,
            palette: Palette::from_config(&self.colors)?,
        })
    }
}

// Custom error type for configuration operations
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    InvalidDimensions { width: usize, height: usize },
    InvalidInterval(u64),
    InvalidKey { command: Command, key: String },
    DuplicateBinding { key: String, first: Command, second: Command },
    MissingColor(char),
    DuplicateColor(char),
    UnknownBlockKey(String),
    InvalidColor { key: char, color: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "config file I/O failed: {err}"),
            ConfigError::Parse(err) => write!(f, "config file is not valid TOML: {err}"),
            ConfigError::Serialize(err) => write!(f, "could not serialize config: {err}"),
            ConfigError::InvalidDimensions { width, height } => write!(
                f,
                "board size {width}x{height} is outside {MIN_BOARD_WIDTH}x{MIN_BOARD_HEIGHT}..={MAX_BOARD_WIDTH}x{MAX_BOARD_HEIGHT}"
            ),
            ConfigError::InvalidInterval(ms) => write!(
                f,
                "drop interval of {ms} ms is below the {MIN_DROP_INTERVAL_MS} ms minimum"
            ),
            ConfigError::InvalidKey { command, key } => {
                write!(f, "unknown key {key:?} bound to {command}")
            }
            ConfigError::DuplicateBinding {
                key,
                first,
                second,
            } => write!(f, "key {key:?} is bound to both {first} and {second}"),
            ConfigError::MissingColor(key) => write!(f, "no color configured for block {key:?}"),
            ConfigError::DuplicateColor(key) => {
                write!(f, "block {key:?} is given more than one color")
            }
            ConfigError::UnknownBlockKey(key) => {
                write!(f, "color configured for unknown block {key:?}")
            }
            ConfigError::InvalidColor { key, color } => {
                write!(f, "block {key:?} has unrecognized color {color:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Serialize(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialize(err)
    }
}
