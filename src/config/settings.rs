//! User settings for Finman
//!
//! Interface preferences persisted as `config.json` next to the data file.

use serde::{Deserialize, Serialize};

use super::paths::FinmanPaths;
use crate::error::FinmanError;

/// User settings for Finman
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Input poll interval of the TUI loop, in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,

    /// Currency symbol shown in front of amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Number of cells inside the Overview progress bar brackets
    #[serde(default = "default_bar_width")]
    pub progress_bar_width: usize,

    /// Whether the TUI captures mouse events
    #[serde(default = "default_true")]
    pub mouse_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_tick_rate() -> u64 {
    50
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_bar_width() -> usize {
    12
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            tick_rate_ms: default_tick_rate(),
            currency_symbol: default_currency(),
            progress_bar_width: default_bar_width(),
            mouse_enabled: default_true(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &FinmanPaths) -> Result<Self, FinmanError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FinmanError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| FinmanError::Config(format!("Failed to parse settings file: {}", e)))?;

        if settings.tick_rate_ms == 0 {
            return Err(FinmanError::Config(
                "tick_rate_ms must be greater than zero".into(),
            ));
        }

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinmanPaths) -> Result<(), FinmanError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinmanError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinmanError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
