//! Timer modes
//!
//! A mode is a named countdown configuration. Its duration is never stored
//! here; it is derived from the live settings whenever the mode is entered.

use serde::{Deserialize, Serialize};

/// One of the three countdown configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// A focus session ("pomodoro")
    #[default]
    Focus,
    ShortBreak,
    LongBreak,
}

impl Mode {
    /// All modes in display order
    pub const ALL: [Mode; 3] = [Mode::Focus, Mode::ShortBreak, Mode::LongBreak];

    /// Human-facing label
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Focus => "Pomodoro",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Focus => "focus",
            Mode::ShortBreak => "short-break",
            Mode::LongBreak => "long-break",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "focus" | "pomodoro" => Some(Mode::Focus),
            "short-break" | "short" => Some(Mode::ShortBreak),
            "long-break" | "long" => Some(Mode::LongBreak),
            _ => None,
        }
    }

    pub fn is_break(&self) -> bool {
        !matches!(self, Mode::Focus)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_focus() {
        assert_eq!(Mode::default(), Mode::Focus);
        assert_eq!(Mode::ALL[0], Mode::Focus);
    }

    #[test]
    fn test_from_str_accepts_names_and_aliases() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_str(mode.as_str()), Some(mode));
        }
        assert_eq!(Mode::from_str("Pomodoro"), Some(Mode::Focus));
        assert_eq!(Mode::from_str("LONG"), Some(Mode::LongBreak));
        assert_eq!(Mode::from_str("nap"), None);
    }

    #[test]
    fn test_breaks() {
        assert!(!Mode::Focus.is_break());
        assert!(Mode::ShortBreak.is_break());
        assert!(Mode::LongBreak.is_break());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Mode::Focus.to_string(), "Pomodoro");
        assert_eq!(Mode::ShortBreak.label(), "Short Break");
        assert_eq!(Mode::LongBreak.label(), "Long Break");
    }

    #[test]
    fn test_serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&Mode::ShortBreak).unwrap(), "\"short-break\"");
    }
}
