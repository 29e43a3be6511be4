//! End-to-end engine exercise against a scripted boundary: plug, edit, save,
//! unplug, replug.

use std::sync::{Arc, Mutex};

use keyforge_boundary::config::{ConfigDelta, DeviceConfig};
use keyforge_boundary::fido::FidoInfo;
use keyforge_boundary::{DeviceBoundary, DeviceInfo, SecurityFlags, StatusPayload};
use keyforge_core::{
    DeviceEngine, EngineConfig, KeyforgeError, KeyforgeResult, SaveOutcome, WorkflowLevel,
};

/// Boundary stand-in that keeps an authoritative device-side config and
/// applies deltas to it, so a post-write refresh observes the new values.
#[derive(Clone)]
struct ScriptedDevice {
    state: Arc<Mutex<DeviceState>>,
}

struct DeviceState {
    present: bool,
    config: DeviceConfig,
}

impl ScriptedDevice {
    fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(DeviceState {
                present: true,
                config: DeviceConfig {
                    vid: "1209".into(),
                    pid: "0001".into(),
                    product_name: "Keyforge Key".into(),
                    led_gpio: 25,
                    led_brightness: 8,
                    touch_timeout: 10,
                    led_driver: Some(1),
                    ..DeviceConfig::default()
                },
            })),
        }
    }

    fn set_present(&self, present: bool) {
        self.state.lock().unwrap().present = present;
    }
}

impl DeviceBoundary for ScriptedDevice {
    type Error = KeyforgeError;

    fn device_status(&self) -> KeyforgeResult<StatusPayload> {
        let state = self.state.lock().unwrap();
        if !state.present {
            return Err(KeyforgeError::Boundary("device removed".into()));
        }
        Ok(StatusPayload {
            info: DeviceInfo {
                serial: "KF-0001".into(),
                flash_used_kib: 128,
                flash_total_kib: 2048,
                firmware_version: "2.1.0".into(),
            },
            config: state.config.clone(),
            security: SecurityFlags {
                secure_boot: true,
                secure_lock: false,
            },
        })
    }

    fn fido_capabilities(&self) -> KeyforgeResult<FidoInfo> {
        Err(KeyforgeError::Boundary("FIDO interface not exposed".into()))
    }

    fn write_config_rescue(&self, delta: &ConfigDelta) -> KeyforgeResult<String> {
        let mut state = self.state.lock().unwrap();
        if !state.present {
            return Err(KeyforgeError::Boundary("device removed".into()));
        }
        let config = &mut state.config;
        if let Some(vid) = &delta.vid {
            config.vid = vid.clone();
        }
        if let Some(pid) = &delta.pid {
            config.pid = pid.clone();
        }
        if let Some(name) = &delta.product_name {
            config.product_name = name.clone();
        }
        if let Some(gpio) = delta.led_gpio {
            config.led_gpio = gpio;
        }
        if let Some(brightness) = delta.led_brightness {
            config.led_brightness = brightness;
        }
        if let Some(timeout) = delta.touch_timeout {
            config.touch_timeout = timeout;
        }
        if let Some(driver) = delta.led_driver {
            config.led_driver = Some(driver);
        }
        if let Some(dimmable) = delta.led_dimmable {
            config.led_dimmable = dimmable;
        }
        if let Some(power_cycle) = delta.power_cycle_on_reset {
            config.power_cycle_on_reset = power_cycle;
        }
        if let Some(steady) = delta.led_steady {
            config.led_steady = steady;
        }
        if let Some(curve) = delta.enable_secp256k1 {
            config.enable_secp256k1 = curve;
        }
        Ok("Config written".into())
    }

    fn write_config_fido(&self, _delta: &ConfigDelta) -> KeyforgeResult<String> {
        Err(KeyforgeError::Boundary("wrong interface for rescue device".into()))
    }

    fn change_pin(&self, _current: Option<&str>, _new: &str) -> KeyforgeResult<String> {
        Ok("PIN changed successfully".into())
    }

    fn set_min_pin_length(&self, _current: &str, length: u8) -> KeyforgeResult<String> {
        Ok(format!("Minimum PIN length set to {length}"))
    }
}

#[test]
fn plug_edit_save_unplug_replug_lifecycle() {
    let config = EngineConfig::default();
    keyforge_core::logging::init(&config.log_level);

    let device = ScriptedDevice::new();
    let mut engine = DeviceEngine::new(device.clone(), config);

    engine.refresh().expect("device present");
    assert!(engine.snapshot().connected);
    assert!(engine.snapshot().fido.is_none(), "capability fetch is non-fatal");

    // Edit through the draft surface with sloppy formatting.
    let mut draft = engine.draft();
    draft.led_brightness = "03".into();
    draft.vid = "0x2E8A".into();
    engine.stage(&draft).expect("draft should normalize");

    let outcome = engine.save_config().expect("write should apply");
    assert!(matches!(outcome, SaveOutcome::Applied { .. }));

    // The device applied the delta and the follow-up refresh captured it.
    assert_eq!(engine.snapshot().config.led_brightness, 3);
    assert_eq!(engine.snapshot().config.vid, "2e8a");
    assert_eq!(engine.snapshot().baseline(), Some(&engine.snapshot().config));

    // A second save is a no-op.
    assert_eq!(engine.save_config().unwrap(), SaveOutcome::NoChanges);

    device.set_present(false);
    assert!(engine.refresh().is_err());
    assert!(!engine.snapshot().connected);
    assert_eq!(
        engine
            .events()
            .iter()
            .filter(|event| event.level == WorkflowLevel::Error)
            .count(),
        1
    );

    device.set_present(true);
    engine.refresh().expect("device back");
    assert!(engine.snapshot().connected);
    assert_eq!(engine.snapshot().config.vid, "2e8a", "edits survived on device");
}
