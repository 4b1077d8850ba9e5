use std::path::Path;

use serde::Deserialize;

use crate::codec::jpeg::EncodeOptions;
use crate::error::TurboJpegError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub encoder: EncodeOptions,
    pub search: SearchSettings,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            encoder: EncodeOptions::default(),
            search: SearchSettings::default(),
            log_filter: "info".to_string(),
        }
    }
}

/// Bounds for picking a quality when no fixed quality is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub default_quality: i32,
    pub min_quality: i32,
    pub max_quality: i32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            default_quality: 60,
            min_quality: 5,
            max_quality: 95,
        }
    }
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> crate::error::Result<Self> {
        let settings: Settings = serde_yml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        self.search.validate()
    }
}

impl SearchSettings {
    /// Require `1 <= min_quality <= default_quality <= max_quality <= 100`.
    pub fn validate(&self) -> crate::error::Result<()> {
        let SearchSettings {
            default_quality,
            min_quality,
            max_quality,
        } = *self;

        if !(1..=100).contains(&min_quality) || !(1..=100).contains(&max_quality) {
            return Err(TurboJpegError::config(format!(
                "Search qualities must be 1-100, got min={min_quality} max={max_quality}"
            )));
        }
        if min_quality > max_quality {
            return Err(TurboJpegError::config(format!(
                "min_quality ({min_quality}) exceeds max_quality ({max_quality})"
            )));
        }
        if !(min_quality..=max_quality).contains(&default_quality) {
            return Err(TurboJpegError::config(format!(
                "default_quality ({default_quality}) must lie within {min_quality}-{max_quality}"
            )));
        }
        Ok(())
    }
}
