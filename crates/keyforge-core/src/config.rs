//! Engine configuration model and helpers.
//!
//! Only engine behavior is configured here. Device configuration is owned by
//! the peripheral and never persisted across restarts.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{KeyforgeError, KeyforgeResult};

/// Minimum PIN length assumed when the FIDO capability record is unavailable.
pub const DEFAULT_MIN_PIN_LENGTH: u8 = 4;

/// VID value reported by devices that expose no rescue interface.
pub const VID_SENTINEL: &str = "0000";

/// Tunable engine behavior, loadable from a TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EngineConfig {
    /// Fallback for PIN-length validation when capabilities are unknown.
    pub fallback_min_pin_length: u8,
    /// Default filter handed to the logger at startup.
    pub log_level: String,
    /// Whether vendor presets may overwrite the edited VID/PID pair.
    pub allow_presets: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fallback_min_pin_length: DEFAULT_MIN_PIN_LENGTH,
            log_level: "info".to_string(),
            allow_presets: true,
        }
    }
}

impl EngineConfig {
    /// Load and validate an engine configuration from `path`.
    pub fn load(path: &Path) -> KeyforgeResult<Self> {
        let raw = fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&raw).map_err(|err| {
            KeyforgeError::InvalidConfig(format!("{}: {err}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that TOML typing alone cannot express.
    pub fn validate(&self) -> KeyforgeResult<()> {
        if !(4..=63).contains(&self.fallback_min_pin_length) {
            return Err(KeyforgeError::InvalidConfig(format!(
                "fallback-min-pin-length must be within 4..=63, got {}",
                self.fallback_min_pin_length
            )));
        }
        Ok(())
    }
}
