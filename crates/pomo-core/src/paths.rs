//! Standard paths used by pomo

use std::path::PathBuf;

const APP_DIR: &str = "pomo";

/// Standard pomo paths
pub struct Paths {
    /// Data directory (~/.local/share/pomo)
    pub data: PathBuf,
    /// Config directory (~/.config/pomo)
    pub config: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}

impl Paths {
    pub fn new() -> Self {
        let data = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join(APP_DIR);

        let config = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join(APP_DIR);

        Self { data, config }
    }

    /// Default location of the read-only settings file
    pub fn settings_file(&self) -> PathBuf {
        self.config.join("settings.json")
    }

    /// Default location of the log file
    pub fn log_file(&self) -> PathBuf {
        self.data.join("pomo.log")
    }
}
