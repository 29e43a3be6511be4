//! One-call logging setup for binaries and test harnesses.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the process logger with `default_level` as the fallback filter.
///
/// `RUST_LOG` overrides the default when set. Safe to call more than once;
/// only the first call takes effect.
pub fn init(default_level: &str) {
    INIT.call_once(|| {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(default_level),
        )
        .format_timestamp_millis()
        .init();
    });
}
