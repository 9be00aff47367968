//! Timer state machine
//!
//! Pure state: no clocks, no tasks. The controller owns the countdown task and
//! feeds ticks in; everything here is deterministic and synchronous.

use serde::Serialize;

use crate::mode::Mode;
use crate::settings::Settings;

/// A completed mode switch produced by a stage advance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: Mode,
    pub to: Mode,
    /// Focus sessions completed since the last long break, after the switch
    pub completed_focus_count: u32,
}

/// Result of feeding one tick into the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The timer is paused; nothing changed
    Ignored,
    /// One second elapsed; this many remain
    Counted(u64),
    /// The countdown hit zero and the stage advanced
    Completed(Transition),
}

/// Current mode, remaining time, running flag and focus-session count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerState {
    active_mode: Mode,
    seconds_remaining: u64,
    is_running: bool,
    completed_focus_count: u32,
}

impl TimerState {
    /// Focus mode, paused, full duration
    pub fn new(settings: &Settings) -> Self {
        Self {
            active_mode: Mode::Focus,
            seconds_remaining: settings.duration_for(Mode::Focus),
            is_running: false,
            completed_focus_count: 0,
        }
    }

    pub fn active_mode(&self) -> Mode {
        self.active_mode
    }

    pub fn seconds_remaining(&self) -> u64 {
        self.seconds_remaining
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn completed_focus_count(&self) -> u32 {
        self.completed_focus_count
    }

    /// Enter `mode` at its full duration, paused. Reselecting the active mode
    /// resets it the same way.
    pub fn select_mode(&mut self, mode: Mode, settings: &Settings) {
        self.active_mode = mode;
        self.seconds_remaining = settings.duration_for(mode);
        self.is_running = false;
    }

    pub fn start(&mut self) {
        self.is_running = true;
    }

    pub fn pause(&mut self) {
        self.is_running = false;
    }

    /// One elapsed second. At one second or less the countdown completes and
    /// the stage advances, which leaves the timer paused in the next mode.
    pub fn tick(&mut self, settings: &Settings) -> Tick {
        if !self.is_running {
            return Tick::Ignored;
        }

        if self.seconds_remaining >= 2 {
            self.seconds_remaining -= 1;
            return Tick::Counted(self.seconds_remaining);
        }

        self.seconds_remaining = 0;
        self.is_running = false;
        Tick::Completed(self.advance_stage(settings))
    }

    /// Switch to the next mode: focus goes to a short break, or to a long
    /// break once the interval is reached; any break goes back to focus.
    pub fn advance_stage(&mut self, settings: &Settings) -> Transition {
        let from = self.active_mode;
        let to = match from {
            Mode::Focus => {
                self.completed_focus_count += 1;
                if self.completed_focus_count >= settings.long_break_interval {
                    self.completed_focus_count = 0;
                    Mode::LongBreak
                } else {
                    Mode::ShortBreak
                }
            }
            Mode::ShortBreak | Mode::LongBreak => Mode::Focus,
        };

        self.select_mode(to, settings);

        Transition {
            from,
            to,
            completed_focus_count: self.completed_focus_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(focus: u32, short: u32, long: u32, interval: u32) -> Settings {
        Settings {
            focus_minutes: focus,
            short_break_minutes: short,
            long_break_minutes: long,
            long_break_interval: interval,
            ..Settings::default()
        }
    }

    /// Tick until the countdown completes, returning the transition and tick count
    fn run_to_completion(state: &mut TimerState, settings: &Settings) -> (Transition, u64) {
        state.start();
        let mut ticks = 0;
        loop {
            ticks += 1;
            if let Tick::Completed(transition) = state.tick(settings) {
                return (transition, ticks);
            }
        }
    }

    #[test]
    fn test_initial_state() {
        let state = TimerState::new(&Settings::default());
        assert_eq!(state.active_mode(), Mode::Focus);
        assert_eq!(state.seconds_remaining(), 1500);
        assert!(!state.is_running());
        assert_eq!(state.completed_focus_count(), 0);
    }

    #[test]
    fn test_select_mode_uses_full_duration() {
        let settings = settings(40, 7, 20, 4);
        let mut state = TimerState::new(&settings);

        for mode in Mode::ALL {
            state.select_mode(mode, &settings);
            assert_eq!(state.active_mode(), mode);
            assert_eq!(
                state.seconds_remaining(),
                u64::from(settings.minutes_for(mode)) * 60
            );
        }
    }

    #[test]
    fn test_reselecting_same_mode_resets_and_pauses() {
        let settings = Settings::default();
        let mut state = TimerState::new(&settings);
        state.start();
        state.tick(&settings);
        state.tick(&settings);
        assert_eq!(state.seconds_remaining(), 1498);

        state.select_mode(Mode::Focus, &settings);
        assert_eq!(state.seconds_remaining(), 1500);
        assert!(!state.is_running());
    }

    #[test]
    fn test_tick_while_paused_is_ignored() {
        let settings = Settings::default();
        let mut state = TimerState::new(&settings);
        assert_eq!(state.tick(&settings), Tick::Ignored);
        assert_eq!(state.seconds_remaining(), 1500);
    }

    #[test]
    fn test_tick_decrements() {
        let settings = Settings::default();
        let mut state = TimerState::new(&settings);
        state.start();
        assert_eq!(state.tick(&settings), Tick::Counted(1499));
        assert!(state.is_running());
    }

    #[test]
    fn test_full_countdown_completes_exactly_once() {
        let settings = settings(1, 1, 1, 4);
        let mut state = TimerState::new(&settings);
        state.start();

        let mut completions = 0;
        let mut running_drops = 0;
        for _ in 0..60 {
            let was_running = state.is_running();
            if let Tick::Completed(_) = state.tick(&settings) {
                completions += 1;
            }
            if was_running && !state.is_running() {
                running_drops += 1;
            }
        }

        assert_eq!(completions, 1);
        assert_eq!(running_drops, 1);
        assert_eq!(state.active_mode(), Mode::ShortBreak);
    }

    #[test]
    fn test_focus_below_interval_goes_to_short_break() {
        let settings = settings(25, 5, 15, 4);
        let mut state = TimerState::new(&settings);
        state.completed_focus_count = 1;

        let transition = state.advance_stage(&settings);
        assert_eq!(transition.from, Mode::Focus);
        assert_eq!(transition.to, Mode::ShortBreak);
        assert_eq!(state.completed_focus_count(), 2);
        assert_eq!(state.seconds_remaining(), 300);
    }

    #[test]
    fn test_focus_at_interval_goes_to_long_break() {
        let settings = settings(25, 5, 15, 4);
        let mut state = TimerState::new(&settings);
        state.completed_focus_count = 3;

        let transition = state.advance_stage(&settings);
        assert_eq!(transition.to, Mode::LongBreak);
        assert_eq!(transition.completed_focus_count, 0);
        assert_eq!(state.completed_focus_count(), 0);
        assert_eq!(state.seconds_remaining(), 900);
    }

    #[test]
    fn test_breaks_always_return_to_focus() {
        let settings = settings(25, 5, 15, 4);
        for mode in [Mode::ShortBreak, Mode::LongBreak] {
            for count in [0, 2, 3] {
                let mut state = TimerState::new(&settings);
                state.select_mode(mode, &settings);
                state.completed_focus_count = count;

                let transition = state.advance_stage(&settings);
                assert_eq!(transition.to, Mode::Focus);
                assert_eq!(state.completed_focus_count(), count);
                assert_eq!(state.seconds_remaining(), 1500);
            }
        }
    }

    #[test]
    fn test_advance_leaves_timer_paused() {
        let settings = Settings::default();
        let mut state = TimerState::new(&settings);
        state.start();
        state.advance_stage(&settings);
        assert!(!state.is_running());
    }

    #[test]
    fn test_interval_of_one_always_long_breaks() {
        let settings = settings(25, 5, 15, 1);
        let mut state = TimerState::new(&settings);
        assert_eq!(state.advance_stage(&settings).to, Mode::LongBreak);
        state.advance_stage(&settings);
        assert_eq!(state.advance_stage(&settings).to, Mode::LongBreak);
    }

    #[test]
    fn test_zero_interval_always_long_breaks() {
        let settings = settings(25, 5, 15, 0);
        let mut state = TimerState::new(&settings);
        assert_eq!(state.advance_stage(&settings).to, Mode::LongBreak);
    }

    #[test]
    fn test_zero_duration_completes_on_first_tick() {
        let settings = settings(25, 0, 15, 4);
        let mut state = TimerState::new(&settings);
        state.select_mode(Mode::ShortBreak, &settings);
        assert_eq!(state.seconds_remaining(), 0);

        state.start();
        let tick = state.tick(&settings);
        assert!(matches!(tick, Tick::Completed(t) if t.to == Mode::Focus));
    }

    #[test]
    fn test_two_focus_cycle_scenario() {
        let settings = settings(25, 5, 15, 2);
        let mut state = TimerState::new(&settings);
        assert_eq!(state.seconds_remaining(), 1500);

        let (transition, ticks) = run_to_completion(&mut state, &settings);
        assert_eq!(ticks, 1500);
        assert_eq!(transition.to, Mode::ShortBreak);
        assert_eq!(state.active_mode(), Mode::ShortBreak);
        assert_eq!(state.seconds_remaining(), 300);
        assert_eq!(state.completed_focus_count(), 1);

        let (transition, ticks) = run_to_completion(&mut state, &settings);
        assert_eq!(ticks, 300);
        assert_eq!(transition.to, Mode::Focus);

        let (transition, _) = run_to_completion(&mut state, &settings);
        assert_eq!(transition.to, Mode::LongBreak);
        assert_eq!(state.active_mode(), Mode::LongBreak);
        assert_eq!(state.seconds_remaining(), 900);
        assert_eq!(state.completed_focus_count(), 0);
    }

    #[test]
    fn test_settings_change_applies_on_next_entry() {
        let original = Settings::default();
        let mut state = TimerState::new(&original);
        state.start();
        state.tick(&original);

        let changed = Settings {
            focus_minutes: 50,
            short_break_minutes: 10,
            ..original
        };
        state.tick(&changed);
        assert_eq!(state.seconds_remaining(), 1498);

        state.select_mode(Mode::ShortBreak, &changed);
        assert_eq!(state.seconds_remaining(), 600);
        state.select_mode(Mode::Focus, &changed);
        assert_eq!(state.seconds_remaining(), 3000);
    }
}
