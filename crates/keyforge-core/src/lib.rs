//! Core synchronization engine for Keyforge security keys.
//!
//! Snapshot store, connection lifecycle, configuration diffing, and
//! authenticated PIN workflows live here so presentation layers can focus on
//! rendering engine state instead of reimplementing device orchestration.

pub mod config;
pub mod diff;
pub mod draft;
pub mod engine;
pub mod error;
pub mod logging;
pub mod presets;
pub mod snapshot;
pub mod workflow;

pub use config::EngineConfig;
pub use diff::config_delta;
pub use draft::ConfigDraft;
pub use engine::{DeviceEngine, SaveOutcome};
pub use error::{KeyforgeError, KeyforgeResult};
pub use presets::{VendorPreset, VENDOR_PRESETS};
pub use snapshot::{DeviceSnapshot, InterfaceMode, SecurityState};
pub use workflow::{
    event, MinPinLengthChange, PinChange, WorkflowEvent, WorkflowLevel, WorkflowReport,
};

pub use keyforge_boundary::config::{ConfigDelta, DeviceConfig};
pub use keyforge_boundary::fido::FidoInfo;
pub use keyforge_boundary::{DeviceBoundary, DeviceInfo, SecurityFlags, StatusPayload};
