//! Free-text edit surface for device configuration.
//!
//! Operator input arrives as raw strings. [`ConfigDraft::resolve`] normalizes
//! them into the canonical typed [`DeviceConfig`] shape (lowercase
//! zero-padded hex for vid/pid, numeric coercion for indices and timeouts)
//! with a specific message per rejected field. Diffing only ever sees
//! canonical values, so `"01"` and `"1"` can never produce a phantom change.

use std::ops::RangeInclusive;

use keyforge_boundary::config::DeviceConfig;

use crate::error::{KeyforgeError, KeyforgeResult};

/// Raw, not-yet-validated configuration fields as edited by an operator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDraft {
    pub vid: String,
    pub pid: String,
    pub product_name: String,
    pub led_gpio: String,
    pub led_brightness: String,
    pub touch_timeout: String,
    /// Empty string means "driver not selected".
    pub led_driver: String,
    pub led_dimmable: bool,
    pub power_cycle_on_reset: bool,
    pub led_steady: bool,
    pub enable_secp256k1: bool,
}

impl ConfigDraft {
    /// Seed an edit surface from a confirmed configuration.
    pub fn from_config(config: &DeviceConfig) -> Self {
        Self {
            vid: config.vid.clone(),
            pid: config.pid.clone(),
            product_name: config.product_name.clone(),
            led_gpio: config.led_gpio.to_string(),
            led_brightness: config.led_brightness.to_string(),
            touch_timeout: config.touch_timeout.to_string(),
            led_driver: config
                .led_driver
                .map(|driver| driver.to_string())
                .unwrap_or_default(),
            led_dimmable: config.led_dimmable,
            power_cycle_on_reset: config.power_cycle_on_reset,
            led_steady: config.led_steady,
            enable_secp256k1: config.enable_secp256k1,
        }
    }

    /// Normalize every field into the canonical typed configuration.
    pub fn resolve(&self) -> KeyforgeResult<DeviceConfig> {
        let led_driver = match self.led_driver.trim() {
            "" => None,
            raw => Some(parse_numeric("led driver", raw, 0..=255)?),
        };

        Ok(DeviceConfig {
            vid: parse_hex_word("vid", &self.vid)?,
            pid: parse_hex_word("pid", &self.pid)?,
            product_name: self.product_name.trim().to_string(),
            led_gpio: parse_numeric("LED GPIO", &self.led_gpio, 0..=29)?,
            led_brightness: parse_numeric("LED brightness", &self.led_brightness, 0..=15)?,
            touch_timeout: parse_numeric("touch timeout", &self.touch_timeout, 1..=255)?,
            led_driver,
            led_dimmable: self.led_dimmable,
            power_cycle_on_reset: self.power_cycle_on_reset,
            led_steady: self.led_steady,
            enable_secp256k1: self.enable_secp256k1,
        })
    }
}

/// Parse a 16-bit identifier from hex input, canonicalizing to 4 lowercase
/// digits. A leading `0x` is tolerated.
fn parse_hex_word(field: &str, raw: &str) -> KeyforgeResult<String> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() {
        return Err(KeyforgeError::InvalidField(format!("{field} is empty")));
    }

    let value = u16::from_str_radix(digits, 16).map_err(|_| {
        KeyforgeError::InvalidField(format!(
            "{field} must be a hex value of at most 4 digits (got {trimmed:?})"
        ))
    })?;

    Ok(format!("{value:04x}"))
}

/// Parse a decimal numeric field and enforce its device-side range.
fn parse_numeric(field: &str, raw: &str, range: RangeInclusive<u8>) -> KeyforgeResult<u8> {
    let value: u8 = raw.trim().parse().map_err(|_| {
        KeyforgeError::InvalidField(format!("{field} must be a number (got {raw:?})"))
    })?;

    if !range.contains(&value) {
        return Err(KeyforgeError::InvalidField(format!(
            "{field} must be within {}..={} (got {value})",
            range.start(),
            range.end()
        )));
    }

    Ok(value)
}
