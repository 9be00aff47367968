//! Timer controller
//!
//! Owns the timer state, the live settings and the one repeating countdown
//! task. The task exists if and only if the timer is running: every path that
//! starts it goes through `restart_ticker`, which aborts the previous one
//! first, and every path that stops it goes through `Inner::cancel_ticker`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, info};

use crate::event::{AdvanceTrigger, TimerEvent, TimerSnapshot};
use crate::mode::Mode;
use crate::settings::Settings;
use crate::timer::{Tick, TimerState, Transition};

const EVENT_CAPACITY: usize = 256;

struct Ticker {
    generation: u64,
    handle: JoinHandle<()>,
}

struct Inner {
    state: TimerState,
    settings: Settings,
    ticker: Option<Ticker>,
    generation: u64,
}

impl Inner {
    fn cancel_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.handle.abort();
        }
    }

    fn owns_ticker(&self, generation: u64) -> bool {
        self.ticker.as_ref().map(|t| t.generation) == Some(generation)
    }

    fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot::new(&self.state, &self.settings)
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle to the timer. Clones share the same state and countdown task.
#[derive(Clone)]
pub struct TimerController {
    inner: Arc<Mutex<Inner>>,
    events: broadcast::Sender<TimerEvent>,
    runtime: Handle,
    tick_interval: Duration,
}

impl TimerController {
    /// Focus mode, paused, full duration. Countdown tasks are spawned on `runtime`.
    pub fn new(settings: Settings, runtime: Handle) -> Self {
        Self::with_tick_interval(settings, runtime, Duration::from_secs(1))
    }

    pub fn with_tick_interval(settings: Settings, runtime: Handle, tick_interval: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state: TimerState::new(&settings),
                settings,
                ticker: None,
                generation: 0,
            })),
            events,
            runtime,
            tick_interval,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        lock(&self.inner).snapshot()
    }

    pub fn settings(&self) -> Settings {
        lock(&self.inner).settings.clone()
    }

    /// Whether a countdown task is currently held
    pub fn is_ticking(&self) -> bool {
        lock(&self.inner).ticker.is_some()
    }

    /// Enter `mode` at its full duration, paused
    pub fn select_mode(&self, mode: Mode) -> TimerSnapshot {
        let snapshot = {
            let mut guard = lock(&self.inner);
            let inner = &mut *guard;
            inner.cancel_ticker();
            inner.state.select_mode(mode, &inner.settings);
            inner.snapshot()
        };

        info!(mode = mode.as_str(), seconds = snapshot.seconds_remaining, "Mode selected");
        self.publish(TimerEvent::StateChanged(snapshot.clone()));
        snapshot
    }

    /// Start or pause the countdown. Returns the new running flag.
    pub fn toggle_running(&self) -> bool {
        let snapshot = {
            let mut guard = lock(&self.inner);
            if guard.state.is_running() {
                guard.cancel_ticker();
                guard.state.pause();
            } else {
                guard.state.start();
                self.restart_ticker(&mut guard);
            }
            guard.snapshot()
        };

        if snapshot.is_running {
            info!(mode = snapshot.mode.as_str(), remaining = %snapshot.clock, "Timer started");
        } else {
            info!(mode = snapshot.mode.as_str(), remaining = %snapshot.clock, "Timer paused");
        }

        let running = snapshot.is_running;
        self.publish(TimerEvent::StateChanged(snapshot));
        running
    }

    /// Skip to the next stage. Skips never auto-start the next countdown.
    pub fn advance_stage(&self) -> Transition {
        let (transition, snapshot) = {
            let mut guard = lock(&self.inner);
            let inner = &mut *guard;
            inner.cancel_ticker();
            let transition = inner.state.advance_stage(&inner.settings);
            (transition, inner.snapshot())
        };

        info!(
            from = transition.from.as_str(),
            to = transition.to.as_str(),
            completed = transition.completed_focus_count,
            "Stage skipped"
        );
        self.publish(TimerEvent::StageAdvanced {
            transition,
            trigger: AdvanceTrigger::Skipped,
            auto_started: false,
        });
        self.publish(TimerEvent::StateChanged(snapshot));
        transition
    }

    /// Replace the settings wholesale. The active countdown keeps its
    /// remaining time; new durations apply the next time a mode is entered.
    pub fn apply_settings(&self, settings: Settings) {
        let snapshot = {
            let mut guard = lock(&self.inner);
            guard.settings = settings.clone();
            guard.snapshot()
        };

        info!(?settings, "Settings applied");
        self.publish(TimerEvent::SettingsApplied(settings));
        self.publish(TimerEvent::StateChanged(snapshot));
    }

    /// Cancel any pending countdown and pause
    pub fn shutdown(&self) {
        let snapshot = {
            let mut guard = lock(&self.inner);
            guard.cancel_ticker();
            guard.state.pause();
            guard.snapshot()
        };

        info!("Timer shut down");
        self.publish(TimerEvent::StateChanged(snapshot));
    }

    fn restart_ticker(&self, inner: &mut Inner) {
        inner.cancel_ticker();
        inner.generation = inner.generation.wrapping_add(1);

        let generation = inner.generation;
        let handle = self.runtime.spawn(run_ticker(
            Arc::downgrade(&self.inner),
            self.events.clone(),
            self.tick_interval,
            generation,
        ));

        inner.ticker = Some(Ticker { generation, handle });
    }

    fn publish(&self, event: TimerEvent) {
        let _ = self.events.send(event);
    }
}

async fn run_ticker(
    shared: Weak<Mutex<Inner>>,
    events: broadcast::Sender<TimerEvent>,
    period: Duration,
    generation: u64,
) {
    let mut interval = time::interval_at(time::Instant::now() + period, period);

    loop {
        interval.tick().await;

        let Some(inner) = shared.upgrade() else {
            break;
        };

        let (published, keep_running) = tick_once(&inner, generation);
        drop(inner);

        for event in published {
            let _ = events.send(event);
        }

        if !keep_running {
            break;
        }
    }
}

/// Apply one tick on behalf of the ticker with the given generation.
/// Returns the events to publish and whether the ticker should keep going.
fn tick_once(shared: &Mutex<Inner>, generation: u64) -> (Vec<TimerEvent>, bool) {
    let mut guard = lock(shared);
    if !guard.owns_ticker(generation) {
        return (Vec::new(), false);
    }

    let inner = &mut *guard;
    match inner.state.tick(&inner.settings) {
        Tick::Ignored => {
            inner.ticker = None;
            (Vec::new(), false)
        }
        Tick::Counted(remaining) => {
            debug!(remaining, "Tick");
            (vec![TimerEvent::StateChanged(inner.snapshot())], true)
        }
        Tick::Completed(transition) => {
            let auto_started = inner.settings.auto_starts(transition.to);
            if auto_started {
                inner.state.start();
            } else {
                // Our own handle; dropping it detaches this task, which then exits.
                inner.ticker = None;
            }

            info!(
                from = transition.from.as_str(),
                to = transition.to.as_str(),
                completed = transition.completed_focus_count,
                auto_started,
                "Stage completed"
            );

            let events = vec![
                TimerEvent::StageAdvanced {
                    transition,
                    trigger: AdvanceTrigger::Completed,
                    auto_started,
                },
                TimerEvent::StateChanged(inner.snapshot()),
            ];
            (events, auto_started)
        }
    }
}
