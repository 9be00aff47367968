//! pomo - Pomodoro timer for the terminal
//!
//! Three modes (focus, short break, long break), a start/pause countdown, and
//! automatic stage advance with a long break after a configurable number of
//! completed focus sessions.
//!
//! - `timer`: the pure state machine (select mode, tick, advance stage)
//! - `controller`: owns the state, the settings and the single countdown task
//! - `settings`: durations and auto-start flags, replaced wholesale on save

pub mod controller;
pub mod event;
pub mod mode;
pub mod settings;
pub mod timer;

pub use controller::TimerController;
pub use event::{AdvanceTrigger, TimerEvent, TimerSnapshot};
pub use mode::Mode;
pub use settings::Settings;
pub use timer::{Tick, TimerState, Transition};
