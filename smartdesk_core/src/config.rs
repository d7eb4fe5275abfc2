//! Settings for the interpreter and the clock picker, read from TOML.
//!
//! ```toml
//! [interpreter]
//! spawn_position = { x = 40.0, y = 80.0 }
//!
//! [clock]
//! label_radius_percent = 45.0
//! ```
//!
//! Every field is optional and falls back to its default.

use std::{fs, io, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::widget::Position;

#[derive(Debug, Default, PartialEq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub interpreter: InterpreterConfig,
    pub clock: ClockConfig,
}

#[derive(Debug, Default, PartialEq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InterpreterConfig {
    /// Where widgets created by commands are placed.
    pub spawn_position: Position,
}

#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockConfig {
    /// Distance of the tick labels from the face center, in percent of the
    /// face size.
    pub label_radius_percent: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        ClockConfig { label_radius_percent: 47.0 }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path)?;
        Config::from_toml_str(&source)
    }
}
