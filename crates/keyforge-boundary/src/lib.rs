#![forbid(unsafe_code)]

//! Command-boundary contracts shared across Keyforge.
//!
//! The engine crate is free to define synchronization and mutation workflows
//! without depending on a concrete transport. Implementations of
//! [`DeviceBoundary`] live next to the native driver layer (PC/SC for rescue
//! mode, CTAPHID for FIDO mode) and are out of scope here.

pub mod config;
pub mod fido;

use std::error::Error;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDelta, DeviceConfig};
use crate::fido::FidoInfo;

/// Immutable per-refresh device identity and flash usage.
///
/// Replaced wholesale on every successful status refresh; flash counters are
/// reported in KiB so rescue and FIDO paths agree on units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub serial: String,
    pub flash_used_kib: u32,
    pub flash_total_kib: u32,
    pub firmware_version: String,
}

/// Device-side security flags as reported by a status refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityFlags {
    pub secure_boot: bool,
    pub secure_lock: bool,
}

/// Full response of a status refresh round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusPayload {
    pub info: DeviceInfo,
    pub config: DeviceConfig,
    pub security: SecurityFlags,
}

/// Request/response channel to an attached security-key peripheral.
///
/// Every method is one blocking round trip. Implementations own timeout
/// policy; callers own sequencing and never issue overlapping requests.
pub trait DeviceBoundary {
    type Error: Error + Send + Sync + 'static;

    /// Read identity, configuration, and security flags from the device.
    fn device_status(&self) -> Result<StatusPayload, Self::Error>;

    /// Read the FIDO2 capability record, when the interface is exposed.
    fn fido_capabilities(&self) -> Result<FidoInfo, Self::Error>;

    /// Write a configuration change-set through the rescue-mode interface.
    fn write_config_rescue(&self, delta: &ConfigDelta) -> Result<String, Self::Error>;

    /// Write a configuration change-set through the FIDO vendor interface.
    fn write_config_fido(&self, delta: &ConfigDelta) -> Result<String, Self::Error>;

    /// Set (no current PIN) or change (current PIN supplied) the device PIN.
    fn change_pin(&self, current: Option<&str>, new: &str) -> Result<String, Self::Error>;

    /// Update the minimum accepted PIN length, authenticated by the current PIN.
    fn set_min_pin_length(&self, current: &str, length: u8) -> Result<String, Self::Error>;
}
