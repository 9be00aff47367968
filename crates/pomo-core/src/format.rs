//! Formatting utilities

use chrono::{DateTime, Local};

/// Format a countdown as MM:SS.
///
/// There is no hour component; minutes past 99 are printed in full.
pub fn clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Format a timestamp as HH:MM
pub fn time(dt: DateTime<Local>) -> String {
    dt.format("%H:%M").to_string()
}
