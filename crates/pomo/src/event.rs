//! Snapshots and events published by the controller

use serde::Serialize;

use crate::mode::Mode;
use crate::settings::Settings;
use crate::timer::{TimerState, Transition};

/// Everything the render surface needs, detached from controller locks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    pub mode: Mode,
    pub label: &'static str,
    pub seconds_remaining: u64,
    /// `seconds_remaining` as MM:SS
    pub clock: String,
    pub is_running: bool,
    pub completed_focus_count: u32,
    pub settings: Settings,
}

impl TimerSnapshot {
    pub fn new(state: &TimerState, settings: &Settings) -> Self {
        let mode = state.active_mode();
        Self {
            mode,
            label: mode.label(),
            seconds_remaining: state.seconds_remaining(),
            clock: pomo_core::format::clock(state.seconds_remaining()),
            is_running: state.is_running(),
            completed_focus_count: state.completed_focus_count(),
            settings: settings.clone(),
        }
    }
}

/// What caused a stage advance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvanceTrigger {
    /// The countdown reached zero
    Completed,
    /// The user skipped ahead
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimerEvent {
    StateChanged(TimerSnapshot),
    StageAdvanced {
        transition: Transition,
        trigger: AdvanceTrigger,
        auto_started: bool,
    },
    SettingsApplied(Settings),
}
