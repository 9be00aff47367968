//! Timer settings
//!
//! A passive record replaced wholesale on save. Values are not validated:
//! a zero duration simply completes on the first tick.

use pomo_core::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::mode::Mode;

/// User-configurable durations and auto-advance behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub focus_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
    /// Resume the countdown when a break completes into focus
    pub auto_start_focus: bool,
    /// Resume the countdown when a focus session completes into a break
    pub auto_start_breaks: bool,
    /// Completed focus sessions before a long break is inserted
    pub long_break_interval: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            focus_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            auto_start_focus: false,
            auto_start_breaks: false,
            long_break_interval: 2,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, or defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        pomo_core::config::load_or_default(path)
    }

    pub fn minutes_for(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Focus => self.focus_minutes,
            Mode::ShortBreak => self.short_break_minutes,
            Mode::LongBreak => self.long_break_minutes,
        }
    }

    /// Full duration of a mode in seconds, derived from the current minutes
    pub fn duration_for(&self, mode: Mode) -> u64 {
        u64::from(self.minutes_for(mode)) * 60
    }

    /// Whether entering `mode` after a completed countdown keeps the timer running
    pub fn auto_starts(&self, mode: Mode) -> bool {
        if mode.is_break() {
            self.auto_start_breaks
        } else {
            self.auto_start_focus
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.focus_minutes, 25);
        assert_eq!(settings.short_break_minutes, 5);
        assert_eq!(settings.long_break_minutes, 15);
        assert_eq!(settings.long_break_interval, 2);
        assert!(!settings.auto_start_focus);
        assert!(!settings.auto_start_breaks);
    }

    #[test]
    fn test_duration_is_minutes_times_sixty() {
        let settings = Settings {
            focus_minutes: 50,
            short_break_minutes: 10,
            long_break_minutes: 30,
            ..Settings::default()
        };
        assert_eq!(settings.duration_for(Mode::Focus), 3000);
        assert_eq!(settings.duration_for(Mode::ShortBreak), 600);
        assert_eq!(settings.duration_for(Mode::LongBreak), 1800);
    }

    #[test]
    fn test_zero_minutes_is_zero_seconds() {
        let settings = Settings {
            short_break_minutes: 0,
            ..Settings::default()
        };
        assert_eq!(settings.duration_for(Mode::ShortBreak), 0);
    }

    #[test]
    fn test_auto_starts_by_mode_kind() {
        let settings = Settings {
            auto_start_focus: false,
            auto_start_breaks: true,
            ..Settings::default()
        };
        assert!(!settings.auto_starts(Mode::Focus));
        assert!(settings.auto_starts(Mode::ShortBreak));
        assert!(settings.auto_starts(Mode::LongBreak));
    }

    #[test]
    fn test_load_fills_missing_fields_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"focus_minutes": 45, "auto_start_breaks": true}"#).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.focus_minutes, 45);
        assert!(settings.auto_start_breaks);
        assert_eq!(settings.short_break_minutes, 5);
        assert_eq!(settings.long_break_interval, 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(&dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_rejects_negative_minutes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"focus_minutes": -5}"#).unwrap();

        assert!(matches!(Settings::load(&path), Err(ConfigError::Parse { .. })));
    }
}
