use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use bevy_ecs::prelude::Resource;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::components::TetrominoType;

// Block key -> color name, e.g. I = "cyan"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorConfig(pub BTreeMap<String, String>);

impl Default for ColorConfig {
    fn default() -> Self {
        let colors = [
            (TetrominoType::I, "cyan"),
            (TetrominoType::J, "blue"),
            (TetrominoType::L, "lightyellow"),
            (TetrominoType::O, "yellow"),
            (TetrominoType::S, "green"),
            (TetrominoType::T, "magenta"),
            (TetrominoType::Z, "red"),
        ];
        Self(
            colors
                .into_iter()
                .map(|(kind, color)| (kind.key().to_string(), color.to_string()))
                .collect(),
        )
    }
}

/// Resolved colors, one per block key.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Palette {
    colors: HashMap<char, Color>,
}

impl Palette {
    /// Builds a palette whose key set is exactly the block keys.
    ///
    /// # Errors
    ///
    /// Fails on an entry for an unknown block, an unparseable color, a block
    /// named twice (keys are case-insensitive) or a block with no color.
    pub fn from_config(config: &ColorConfig) -> Result<Self, ConfigError> {
        let mut colors = HashMap::with_capacity(config.0.len());
        for (name, color_name) in &config.0 {
            let key = single_char(name)
                .filter(|key| TetrominoType::from_key(*key).is_some())
                .ok_or_else(|| ConfigError::UnknownBlockKey(name.clone()))?;
            let color = Color::from_str(color_name).map_err(|_| ConfigError::InvalidColor {
                key,
                color: color_name.clone(),
            })?;
            if colors.insert(key, color).is_some() {
                return Err(ConfigError::DuplicateColor(key));
            }
        }

        if let Some(missing) = TetrominoType::ALL
            .iter()
            .map(|kind| kind.key())
            .find(|key| !colors.contains_key(key))
        {
            return Err(ConfigError::MissingColor(missing));
        }

        Ok(Self { colors })
    }

    #[must_use]
    pub fn color(&self, key: char) -> Option<Color> {
        self.colors.get(&key).copied()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_config(&ColorConfig::default())
            .unwrap_or_else(|e| unreachable!("built-in palette is invalid: {e}"))
    }
}

fn single_char(name: &str) -> Option<char> {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c.to_ascii_uppercase()),
        _ => None,
    }
}
