//! Widget configuration, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) is valid:
//!
//! ```toml
//! countdown_tick_ms = 100
//!
//! [alarm]
//! flash = true
//! flash_ms = 3000
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::countdown::DEFAULT_TICK_MS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML")]
    ParseToml(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AlarmConfig {
    pub flash: bool,
    pub flash_ms: u64,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            flash: true,
            flash_ms: 3000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Countdown refresh interval. Must stay under a second.
    pub countdown_tick_ms: u64,
    pub alarm: AlarmConfig,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            countdown_tick_ms: DEFAULT_TICK_MS,
            alarm: AlarmConfig::default(),
        }
    }
}

impl TimerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: TimerConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..1000).contains(&self.countdown_tick_ms) {
            return Err(ConfigError::Invalid("countdown_tick_ms must be between 1 and 999"));
        }
        if self.alarm.flash_ms == 0 {
            return Err(ConfigError::Invalid("alarm.flash_ms must be greater than zero"));
        }
        Ok(())
    }
}
