//! Pomo Core - Shared functionality for the pomo timer
//!
//! Paths, read-only configuration loading, clock formatting and log setup.

pub mod config;
pub mod format;
pub mod logging;
pub mod paths;

pub use config::ConfigError;
pub use paths::Paths;
