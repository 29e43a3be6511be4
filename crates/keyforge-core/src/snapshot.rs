//! Last-confirmed device state and the frozen baseline used for diffing.
//!
//! The snapshot is an owned value, fully replaced on every successful
//! refresh. A failed refresh leaves the previous contents in place (stale but
//! harmless, since `connected == false` gates every consumer) except that the
//! FIDO capability record is cleared.

use keyforge_boundary::config::DeviceConfig;
use keyforge_boundary::fido::FidoInfo;
use keyforge_boundary::{DeviceInfo, StatusPayload};

use crate::config::VID_SENTINEL;

/// Which device-side configuration interface the engine talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InterfaceMode {
    /// Rescue applet is reachable; configuration writes go over APDU.
    Rescue,
    /// Only the FIDO vendor interface is reachable.
    #[default]
    Fido,
}

impl InterfaceMode {
    /// Classify the interface from the refreshed VID.
    ///
    /// Rescue mode requires a present, non-sentinel VID; everything else is
    /// FIDO. Computed once per successful refresh, never from stale state.
    pub fn classify(vid: &str) -> Self {
        if vid.is_empty() || vid == VID_SENTINEL {
            InterfaceMode::Fido
        } else {
            InterfaceMode::Rescue
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InterfaceMode::Rescue => "rescue",
            InterfaceMode::Fido => "fido",
        }
    }
}

/// Security posture of the device plus the local destructive-action gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SecurityState {
    pub secure_boot: bool,
    pub secure_lock: bool,
    /// Operator acknowledgement for the (still disabled) permanent-lock
    /// action. Local UI state only; never written to the device and never
    /// overwritten by a refresh.
    pub lock_confirmed: bool,
}

/// Last-known device state plus the live edit buffer.
#[derive(Debug, Clone, Default)]
pub struct DeviceSnapshot {
    /// True iff the most recent refresh attempt completed without error.
    pub connected: bool,
    /// Meaningful only while `connected` is true.
    pub mode: InterfaceMode,
    pub info: Option<DeviceInfo>,
    /// Live, operator-editable configuration.
    pub config: DeviceConfig,
    /// Device-confirmed configuration captured at the last refresh; the sole
    /// diff reference. Editing `config` never touches this.
    baseline: Option<DeviceConfig>,
    pub security: SecurityState,
    pub fido: Option<FidoInfo>,
}

impl DeviceSnapshot {
    /// Replace device-confirmed state from a successful status round trip.
    ///
    /// Captures the baseline verbatim and resets the live edit buffer to
    /// match ground truth. The FIDO record is set separately because its
    /// fetch is an independent request.
    pub fn apply_status(&mut self, payload: StatusPayload) {
        self.mode = InterfaceMode::classify(&payload.config.vid);
        self.info = Some(payload.info);
        self.baseline = Some(payload.config.clone());
        self.config = payload.config;
        self.security.secure_boot = payload.security.secure_boot;
        self.security.secure_lock = payload.security.secure_lock;
        self.connected = true;
    }

    /// Record a failed refresh: connection drops, capabilities clear, and
    /// the last-known info/config stay in place.
    pub fn mark_disconnected(&mut self) {
        self.connected = false;
        self.fido = None;
    }

    pub fn baseline(&self) -> Option<&DeviceConfig> {
        self.baseline.as_ref()
    }

    /// Device-reported minimum PIN length, or `fallback` when the FIDO
    /// capability record is unavailable.
    pub fn min_pin_length(&self, fallback: u8) -> u8 {
        self.fido
            .as_ref()
            .map(|fido| fido.min_pin_length)
            .unwrap_or(fallback)
    }

    /// Whether a client PIN is known to be set on the device.
    pub fn pin_set(&self) -> bool {
        self.fido.as_ref().is_some_and(FidoInfo::pin_set)
    }
}
