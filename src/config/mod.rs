pub mod settings;

use settings::Settings;
use std::path::{Path, PathBuf};

/// Environment variable naming the settings file read when the library loads.
pub const SETTINGS_ENV: &str = "TURBOJPEG_BRIDGE_SETTINGS";

/// Load settings from `path`.
///
/// No path, or a path that does not exist, yields the default settings.
pub fn load_settings(path: Option<&Path>) -> crate::error::Result<Settings> {
    match path {
        Some(p) if p.exists() => Settings::from_file(p),
        _ => Ok(Settings::default()),
    }
}

/// Load settings from the file named by [`SETTINGS_ENV`], if set.
pub fn load_settings_from_env() -> crate::error::Result<Settings> {
    let path = std::env::var_os(SETTINGS_ENV).map(PathBuf::from);
    load_settings(path.as_deref())
}
