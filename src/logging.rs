// tracing setup for the bridge

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Target attached to every event the bridge emits. On Android it is also
/// the logcat tag.
pub const LOG_TAG: &str = "TurboJpeg";

fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber: logcat on Android, fmt to stdout elsewhere.
///
/// `RUST_LOG` takes precedence over `default_filter`. Returns `false` when a
/// subscriber is already installed (by the host or an earlier call), which
/// leaves the existing one in place.
pub fn init(default_filter: &str) -> bool {
    let registry = tracing_subscriber::registry().with(env_filter(default_filter));

    #[cfg(target_os = "android")]
    let registry = registry.with(paranoid_android::layer(LOG_TAG));

    #[cfg(not(target_os = "android"))]
    let registry = registry.with(tracing_subscriber::fmt::layer().with_target(true));

    registry.try_init().is_ok()
}
