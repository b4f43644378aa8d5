//! Calculator configuration (rpncalc.toml)
//!
//! Every key is optional:
//!
//! ```toml
//! bit_width = 32
//! mode = "programmer"
//! base = "hex"
//! notation = "engineering"
//! precision = 12
//! coercion = "saturate"
//! undo_depth = 64
//! group_digits = true
//! ```

use crate::display::{DisplaySettings, Notation};
use crate::eval::Mode;
use crate::value::{Base, BitWidth, CoercionPolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to write config: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("bit_width must be between 1 and {max}, got {0}", max = BitWidth::MAX_BITS)]
    InvalidBitWidth(u32),

    #[error("precision must be between 1 and 17, got {0}")]
    InvalidPrecision(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Programmer register width in bits
    pub bit_width: u32,

    /// Mode the session starts in
    pub mode: Mode,

    pub base: Base,

    pub notation: Notation,

    /// Significant digits for reals
    pub precision: usize,

    /// Real -> Integer policy on entering programmer mode
    pub coercion: CoercionPolicy,

    /// Stack snapshots kept for undo
    pub undo_depth: usize,

    pub group_digits: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bit_width: BitWidth::DEFAULT.bits(),
            mode: Mode::Basic,
            base: Base::Dec,
            notation: Notation::Normal,
            precision: 10,
            coercion: CoercionPolicy::Strict,
            undo_depth: 64,
            group_digits: false,
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.width()?;
        if !(1..=17).contains(&self.precision) {
            return Err(ConfigError::InvalidPrecision(self.precision));
        }
        Ok(())
    }

    pub fn width(&self) -> Result<BitWidth, ConfigError> {
        BitWidth::new(self.bit_width).ok_or(ConfigError::InvalidBitWidth(self.bit_width))
    }

    pub fn display_settings(&self) -> DisplaySettings {
        DisplaySettings {
            base: self.base,
            notation: self.notation,
            precision: self.precision,
            group_digits: self.group_digits,
        }
    }
}
