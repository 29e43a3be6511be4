//! Device configuration record and the minimal change-set written back.
//!
//! `vid`/`pid` are canonical lowercase 4-hex-digit strings; numeric fields
//! are typed values, so equality is value equality and wire round trips are
//! lossless. Normalization of free-text operator input happens in the engine
//! crate before values reach this shape.

use serde::{Deserialize, Serialize};

/// Mutable, operator-editable device configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceConfig {
    pub vid: String,
    pub pid: String,
    pub product_name: String,
    pub led_gpio: u8,
    pub led_brightness: u8,
    pub touch_timeout: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub led_driver: Option<u8>,
    pub led_dimmable: bool,
    pub power_cycle_on_reset: bool,
    pub led_steady: bool,
    pub enable_secp256k1: bool,
}

/// Subset of [`DeviceConfig`] fields that differ from the device baseline.
///
/// Only populated fields are written. Two groups are packed device-side and
/// must always travel together: `vid`/`pid` share one identity word, and the
/// three behavior booleans share one options bitmask.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDelta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub led_gpio: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub led_brightness: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub touch_timeout: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub led_driver: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub led_dimmable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_cycle_on_reset: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub led_steady: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_secp256k1: Option<bool>,
}

impl ConfigDelta {
    /// True when no field would be written.
    pub fn is_empty(&self) -> bool {
        self.vid.is_none()
            && self.pid.is_none()
            && self.product_name.is_none()
            && self.led_gpio.is_none()
            && self.led_brightness.is_none()
            && self.touch_timeout.is_none()
            && self.led_driver.is_none()
            && self.led_dimmable.is_none()
            && self.power_cycle_on_reset.is_none()
            && self.led_steady.is_none()
            && self.enable_secp256k1.is_none()
    }
}
