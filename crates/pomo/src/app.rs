//! Application state and key handling

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::broadcast::{self, error::TryRecvError};

use pomo::{AdvanceTrigger, Mode, Settings, TimerController, TimerEvent, TimerSnapshot};

const MAX_EVENTS: usize = 100;

/// A field of the settings form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsField {
    #[default]
    FocusMinutes,
    ShortBreakMinutes,
    LongBreakMinutes,
    AutoStartFocus,
    AutoStartBreaks,
    LongBreakInterval,
}

impl SettingsField {
    pub const ALL: [SettingsField; 6] = [
        SettingsField::FocusMinutes,
        SettingsField::ShortBreakMinutes,
        SettingsField::LongBreakMinutes,
        SettingsField::AutoStartFocus,
        SettingsField::AutoStartBreaks,
        SettingsField::LongBreakInterval,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::FocusMinutes => "Pomodoro (min)",
            Self::ShortBreakMinutes => "Short Break (min)",
            Self::LongBreakMinutes => "Long Break (min)",
            Self::AutoStartFocus => "Auto start Pomodoros",
            Self::AutoStartBreaks => "Auto start Breaks",
            Self::LongBreakInterval => "Long Break Interval",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn is_toggle(self) -> bool {
        matches!(self, Self::AutoStartFocus | Self::AutoStartBreaks)
    }
}

/// Local draft of the settings; only saving hands it to the controller
#[derive(Debug, Clone)]
pub struct SettingsForm {
    pub draft: Settings,
    pub selected: SettingsField,
}

impl SettingsForm {
    pub fn new(settings: Settings) -> Self {
        Self {
            draft: settings,
            selected: SettingsField::default(),
        }
    }

    fn number_mut(&mut self, field: SettingsField) -> Option<&mut u32> {
        match field {
            SettingsField::FocusMinutes => Some(&mut self.draft.focus_minutes),
            SettingsField::ShortBreakMinutes => Some(&mut self.draft.short_break_minutes),
            SettingsField::LongBreakMinutes => Some(&mut self.draft.long_break_minutes),
            SettingsField::LongBreakInterval => Some(&mut self.draft.long_break_interval),
            SettingsField::AutoStartFocus | SettingsField::AutoStartBreaks => None,
        }
    }

    fn flag_mut(&mut self, field: SettingsField) -> Option<&mut bool> {
        match field {
            SettingsField::AutoStartFocus => Some(&mut self.draft.auto_start_focus),
            SettingsField::AutoStartBreaks => Some(&mut self.draft.auto_start_breaks),
            _ => None,
        }
    }

    /// Display value of a field
    pub fn value(&self, field: SettingsField) -> String {
        let on_off = |flag: bool| {
            let text = if flag { "on" } else { "off" };
            text.to_string()
        };
        match field {
            SettingsField::FocusMinutes => self.draft.focus_minutes.to_string(),
            SettingsField::ShortBreakMinutes => self.draft.short_break_minutes.to_string(),
            SettingsField::LongBreakMinutes => self.draft.long_break_minutes.to_string(),
            SettingsField::AutoStartFocus => on_off(self.draft.auto_start_focus),
            SettingsField::AutoStartBreaks => on_off(self.draft.auto_start_breaks),
            SettingsField::LongBreakInterval => self.draft.long_break_interval.to_string(),
        }
    }

    pub fn next_field(&mut self) {
        self.selected = self.selected.next();
    }

    pub fn prev_field(&mut self) {
        self.selected = self.selected.prev();
    }

    /// +1 on numbers, flip on flags
    pub fn increment(&mut self) {
        if let Some(value) = self.number_mut(self.selected) {
            *value = value.saturating_add(1);
        } else {
            self.toggle();
        }
    }

    /// -1 on numbers (stops at zero), flip on flags
    pub fn decrement(&mut self) {
        if let Some(value) = self.number_mut(self.selected) {
            *value = value.saturating_sub(1);
        } else {
            self.toggle();
        }
    }

    pub fn toggle(&mut self) {
        if let Some(flag) = self.flag_mut(self.selected) {
            *flag = !*flag;
        }
    }

    pub fn push_digit(&mut self, digit: u32) {
        if let Some(value) = self.number_mut(self.selected) {
            *value = value.saturating_mul(10).saturating_add(digit);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(value) = self.number_mut(self.selected) {
            *value /= 10;
        }
    }
}

/// Which screen is showing
#[derive(Debug, Clone)]
pub enum View {
    Timer,
    Settings(SettingsForm),
}

/// An entry in the event log
#[derive(Debug, Clone)]
pub struct EventInfo {
    pub timestamp: DateTime<Local>,
    pub message: String,
}

/// Application state
pub struct App {
    pub controller: TimerController,
    pub snapshot: TimerSnapshot,
    pub view: View,
    pub show_help: bool,
    pub should_quit: bool,
    pub events: Vec<EventInfo>,
    updates: broadcast::Receiver<TimerEvent>,
}

impl App {
    pub fn new(controller: TimerController) -> Self {
        let updates = controller.subscribe();
        let snapshot = controller.snapshot();
        let mut app = Self {
            controller,
            snapshot,
            view: View::Timer,
            show_help: false,
            should_quit: false,
            events: Vec::new(),
            updates,
        };
        app.log("Ready");
        app
    }

    /// Pull pending controller events and take a fresh snapshot
    pub fn refresh(&mut self) {
        loop {
            match self.updates.try_recv() {
                Ok(event) => self.record(event),
                Err(TryRecvError::Lagged(_)) => continue,
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        self.snapshot = self.controller.snapshot();
    }

    fn record(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::StageAdvanced {
                transition,
                trigger,
                auto_started,
            } => {
                let verb = match trigger {
                    AdvanceTrigger::Completed => "finished",
                    AdvanceTrigger::Skipped => "skipped",
                };
                let mut message = format!(
                    "{} {} -> {}",
                    transition.from.label(),
                    verb,
                    transition.to.label()
                );
                if auto_started {
                    message.push_str(" (auto-started)");
                }
                self.log(message);
            }
            TimerEvent::SettingsApplied(_) => self.log("Settings saved"),
            TimerEvent::StateChanged(_) => {}
        }
    }

    fn log(&mut self, message: impl Into<String>) {
        self.events.push(EventInfo {
            timestamp: Local::now(),
            message: message.into(),
        });

        if self.events.len() > MAX_EVENTS {
            self.events.drain(0..self.events.len() - MAX_EVENTS);
        }
    }

    /// Wall-clock time the current countdown ends, if it is running
    pub fn ends_at(&self) -> Option<DateTime<Local>> {
        if !self.snapshot.is_running {
            return None;
        }
        let remaining = i64::try_from(self.snapshot.seconds_remaining).ok()?;
        Some(Local::now() + chrono::Duration::seconds(remaining))
    }

    pub fn select_mode(&mut self, mode: Mode) {
        self.snapshot = self.controller.select_mode(mode);
        self.log(format!("{} selected", mode.label()));
    }

    pub fn toggle_running(&mut self) {
        let running = self.controller.toggle_running();
        self.log(if running { "Started" } else { "Paused" });
        self.refresh();
    }

    /// Manual skip, offered only while the countdown runs
    pub fn skip(&mut self) {
        if self.snapshot.is_running {
            self.controller.advance_stage();
            self.refresh();
        }
    }

    pub fn open_settings(&mut self) {
        self.view = View::Settings(SettingsForm::new(self.controller.settings()));
    }

    pub fn close_settings(&mut self) {
        self.view = View::Timer;
    }

    pub fn save_settings(&mut self) {
        if let View::Settings(form) = &self.view {
            self.controller.apply_settings(form.draft.clone());
        }
        self.close_settings();
        self.refresh();
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn quit(&mut self) {
        self.controller.shutdown();
        self.should_quit = true;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        match self.view {
            View::Timer => self.handle_timer_key(key.code),
            View::Settings(_) => self.handle_settings_key(key.code),
        }
    }

    fn handle_timer_key(&mut self, code: KeyCode) {
        if self.show_help {
            if matches!(code, KeyCode::Char('?') | KeyCode::Esc) {
                self.toggle_help();
            }
            return;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Char('1') => self.select_mode(Mode::Focus),
            KeyCode::Char('2') => self.select_mode(Mode::ShortBreak),
            KeyCode::Char('3') => self.select_mode(Mode::LongBreak),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_running(),
            KeyCode::Char('n') => self.skip(),
            KeyCode::Char('s') => self.open_settings(),
            KeyCode::Char('?') => self.toggle_help(),
            _ => {}
        }
    }

    fn handle_settings_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.close_settings();
                return;
            }
            KeyCode::Enter => {
                self.save_settings();
                return;
            }
            _ => {}
        }

        let View::Settings(form) = &mut self.view else {
            return;
        };

        match code {
            KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') => form.next_field(),
            KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') => form.prev_field(),
            KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('l') => form.increment(),
            KeyCode::Left | KeyCode::Char('-') | KeyCode::Char('h') => form.decrement(),
            KeyCode::Char(' ') => form.toggle(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(c) => {
                if let Some(digit) = c.to_digit(10) {
                    form.push_digit(digit);
                }
            }
            _ => {}
        }
    }
}
