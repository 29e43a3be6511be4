//! Minimal change-set computation between live edits and the baseline.
//!
//! The change-set never carries an unchanged field. Two groups are forced to
//! travel as units because they occupy packed words on the device: the
//! vid/pid identity pair, and the {dimmable, power-cycle-on-reset, steady}
//! options trio. Writing one member with a stale partner would clobber the
//! others, so any member change pulls the whole group in.

use keyforge_boundary::config::{ConfigDelta, DeviceConfig};

/// Compute the minimal set of fields in `live` that differ from `baseline`.
pub fn config_delta(live: &DeviceConfig, baseline: &DeviceConfig) -> ConfigDelta {
    let mut delta = ConfigDelta::default();

    if live.vid != baseline.vid || live.pid != baseline.pid {
        delta.vid = Some(live.vid.clone());
        delta.pid = Some(live.pid.clone());
    }

    if live.product_name != baseline.product_name {
        delta.product_name = Some(live.product_name.clone());
    }
    if live.led_gpio != baseline.led_gpio {
        delta.led_gpio = Some(live.led_gpio);
    }
    if live.led_brightness != baseline.led_brightness {
        delta.led_brightness = Some(live.led_brightness);
    }
    if live.touch_timeout != baseline.touch_timeout {
        delta.touch_timeout = Some(live.touch_timeout);
    }
    if live.led_driver != baseline.led_driver {
        // The wire shape cannot express "clear the driver"; only a selected
        // driver is written.
        delta.led_driver = live.led_driver;
    }
    if live.enable_secp256k1 != baseline.enable_secp256k1 {
        delta.enable_secp256k1 = Some(live.enable_secp256k1);
    }

    if live.led_dimmable != baseline.led_dimmable
        || live.power_cycle_on_reset != baseline.power_cycle_on_reset
        || live.led_steady != baseline.led_steady
    {
        delta.led_dimmable = Some(live.led_dimmable);
        delta.power_cycle_on_reset = Some(live.power_cycle_on_reset);
        delta.led_steady = Some(live.led_steady);
    }

    delta
}

/// One human-readable line per field about to be written, for audit logging.
pub fn describe_fields(delta: &ConfigDelta) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(vid) = &delta.vid {
        lines.push(format!("vid -> {vid}"));
    }
    if let Some(pid) = &delta.pid {
        lines.push(format!("pid -> {pid}"));
    }
    if let Some(name) = &delta.product_name {
        lines.push(format!("product name -> {name:?}"));
    }
    if let Some(gpio) = delta.led_gpio {
        lines.push(format!("LED GPIO -> {gpio}"));
    }
    if let Some(brightness) = delta.led_brightness {
        lines.push(format!("LED brightness -> {brightness}"));
    }
    if let Some(timeout) = delta.touch_timeout {
        lines.push(format!("touch timeout -> {timeout}s"));
    }
    if let Some(driver) = delta.led_driver {
        lines.push(format!("LED driver -> {driver}"));
    }
    if let Some(dimmable) = delta.led_dimmable {
        lines.push(format!("LED dimmable -> {dimmable}"));
    }
    if let Some(power_cycle) = delta.power_cycle_on_reset {
        lines.push(format!("power-cycle on reset -> {power_cycle}"));
    }
    if let Some(steady) = delta.led_steady {
        lines.push(format!("LED steady -> {steady}"));
    }
    if let Some(curve) = delta.enable_secp256k1 {
        lines.push(format!("secp256k1 support -> {curve}"));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> DeviceConfig {
        DeviceConfig {
            vid: "1209".into(),
            pid: "0001".into(),
            product_name: "Keyforge Key".into(),
            led_gpio: 25,
            led_brightness: 8,
            touch_timeout: 10,
            led_driver: Some(1),
            led_dimmable: true,
            power_cycle_on_reset: false,
            led_steady: false,
            enable_secp256k1: false,
        }
    }

    #[test]
    fn identical_configs_produce_empty_delta() {
        let config = baseline();
        assert!(config_delta(&config, &config).is_empty());
    }

    #[test]
    fn single_numeric_change_stays_isolated() {
        let mut live = baseline();
        live.led_gpio = 4;

        let delta = config_delta(&live, &baseline());
        assert_eq!(delta.led_gpio, Some(4));
        assert_eq!(
            delta,
            ConfigDelta {
                led_gpio: Some(4),
                ..ConfigDelta::default()
            }
        );
    }

    #[test]
    fn vid_change_pulls_pid_along() {
        let mut live = baseline();
        live.vid = "2e8a".into();

        let delta = config_delta(&live, &baseline());
        assert_eq!(delta.vid.as_deref(), Some("2e8a"));
        assert_eq!(delta.pid.as_deref(), Some("0001"));
        assert!(delta.product_name.is_none());
    }

    #[test]
    fn any_option_flag_change_pulls_the_trio() {
        for flip in 0..3 {
            let mut live = baseline();
            match flip {
                0 => live.led_dimmable = !live.led_dimmable,
                1 => live.power_cycle_on_reset = !live.power_cycle_on_reset,
                _ => live.led_steady = !live.led_steady,
            }

            let delta = config_delta(&live, &baseline());
            assert!(delta.led_dimmable.is_some(), "flip {flip}");
            assert!(delta.power_cycle_on_reset.is_some(), "flip {flip}");
            assert!(delta.led_steady.is_some(), "flip {flip}");
            assert!(delta.vid.is_none());
        }
    }

    #[test]
    fn describe_lists_exactly_the_written_fields() {
        let mut live = baseline();
        live.touch_timeout = 15;
        live.product_name = "Renamed".into();

        let lines = describe_fields(&config_delta(&live, &baseline()));
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().any(|line| line.contains("touch timeout")));
        assert!(lines.iter().any(|line| line.contains("Renamed")));
    }
}
