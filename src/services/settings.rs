// ytcontrols Settings Engine
// Tuning knobs for the extension core: poll and retry intervals, the home
// URL used when opening a fresh tab, and the notification toggle.
// Stored as a JSON file; the path can be overridden via YTCONTROLS_SETTINGS.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::errors::SettingsError;

/// Environment variable overriding the settings file path.
pub const SETTINGS_PATH_ENV: &str = "YTCONTROLS_SETTINGS";

const DEFAULT_PATH: &str = "ytcontrols.json";

/// User-tunable settings. Unknown keys in the file are ignored; missing keys
/// fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    /// Fallback poll interval for video detection, in milliseconds.
    pub poll_interval_ms: u64,
    /// Retry interval for internal player acquisition, in milliseconds.
    pub bridge_retry_ms: u64,
    /// URL opened when no YouTube tab exists.
    pub youtube_home_url: String,
    /// When false, the coordinator stays silent instead of raising alerts.
    pub notifications_enabled: bool,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            bridge_retry_ms: 1000,
            youtube_home_url: "https://www.youtube.com".to_string(),
            notifications_enabled: true,
        }
    }
}

impl ControlSettings {
    /// Load from the default location (env override, then the working
    /// directory). A missing or malformed file yields defaults; a parse
    /// failure is logged but never fatal.
    pub fn load() -> Self {
        let path = std::env::var(SETTINGS_PATH_ENV).unwrap_or_else(|_| DEFAULT_PATH.to_string());
        match Self::load_from(Path::new(&path)) {
            Ok(settings) => settings,
            Err(SettingsError::Io(_)) => Self::default(),
            Err(e) => {
                log::warn!("ignoring settings file {}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Load from an explicit path. The file must exist and parse.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::Io(format!("Failed to read settings file: {}", e)))?;
        serde_json::from_str(&content)
            .map_err(|e| SettingsError::Parse(format!("Failed to parse settings file: {}", e)))
    }

    /// Save to an explicit path, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::Io(format!("Failed to create settings directory: {}", e))
            })?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SettingsError::Parse(format!("Failed to serialize settings: {}", e)))?;
        fs::write(path, json)
            .map_err(|e| SettingsError::Io(format!("Failed to write settings file: {}", e)))
    }
}
