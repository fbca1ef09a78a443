//! Game configuration.
//!
//! Resolved from environment variables (defaults in parentheses):
//!
//! - `TERMTRIS_TICK_MS`: gravity interval in milliseconds (1000)
//! - `TERMTRIS_BELL`: ring the terminal bell when a piece locks (off)
//! - `TERMTRIS_SEED`: fixed seed for the piece sequence (derived from the clock)

use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::types::DEFAULT_TICK_MS;

pub const ENV_TICK_MS: &str = "TERMTRIS_TICK_MS";
pub const ENV_BELL: &str = "TERMTRIS_BELL";
pub const ENV_SEED: &str = "TERMTRIS_SEED";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}={value:?}: expected a positive number of milliseconds")]
    InvalidTickInterval { var: &'static str, value: String },
    #[error("{var}={value:?}: expected on/off, true/false, yes/no or 1/0")]
    InvalidSwitch { var: &'static str, value: String },
    #[error("{var}={value:?}: expected an unsigned 32-bit seed")]
    InvalidSeed { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Gravity interval in milliseconds
    pub tick_interval_ms: u64,
    /// Ring the bell when a piece locks
    pub bell: bool,
    /// Piece sequence seed; `None` picks one from the wall clock
    pub seed: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_MS,
            bell: false,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Resolve from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Resolve using `lookup` to read variables; unset or blank means default
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |var: &str| {
            lookup(var)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let mut config = Self::default();

        if let Some(value) = read(ENV_TICK_MS) {
            config.tick_interval_ms = match value.parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                _ => return Err(ConfigError::InvalidTickInterval { var: ENV_TICK_MS, value }),
            };
        }

        if let Some(value) = read(ENV_BELL) {
            config.bell = match value.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => return Err(ConfigError::InvalidSwitch { var: ENV_BELL, value }),
            };
        }

        if let Some(value) = read(ENV_SEED) {
            config.seed = match value.parse::<u32>() {
                Ok(seed) => Some(seed),
                Err(_) => return Err(ConfigError::InvalidSeed { var: ENV_SEED, value }),
            };
        }

        Ok(config)
    }

    /// The configured seed, or one taken from the wall clock
    pub fn resolved_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs() as u32 ^ d.subsec_nanos())
                .unwrap_or(1)
        })
    }
}
