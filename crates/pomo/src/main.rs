//! pomo - Pomodoro timer for the terminal
//!
//! Usage:
//!   pomo                          Launch with default (or configured) settings
//!   pomo --focus 50 --interval 4  Override durations for this run
//!   pomo --auto-start-breaks      Roll straight into breaks when focus ends

mod app;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use pomo::{Mode, Settings, TimerController};
use pomo_core::Paths;

use app::App;

const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// pomo - Pomodoro timer for the terminal
#[derive(Parser, Debug)]
#[command(name = "pomo")]
#[command(about = "Pomodoro timer with focus sessions, short breaks and long breaks")]
#[command(version)]
#[command(after_help = r#"MODES:
    Pomodoro      Focus session (default 25 min)
    Short Break   Between focus sessions (default 5 min)
    Long Break    After every N focus sessions (default 15 min, N = 2)

EXAMPLES:
    pomo                          # Start with defaults
    pomo --focus 50 --short-break 10
    pomo --interval 4             # Long break after every 4th session
    pomo --mode short-break       # Open on a break
    pomo --config ./settings.json # Seed settings from a file

CONFIG:
    Settings are read (never written) from ~/.config/pomo/settings.json
    if present. Command-line flags take precedence. Changes made in the
    settings screen last until the program exits.

KEY BINDINGS:
    1 / 2 / 3     Pomodoro / Short Break / Long Break
    Space, Enter  Start or pause
    n             Skip to the next stage (while running)
    s             Settings
    ?             Help
    q, Esc        Quit

LOGGING:
    Logs go to ~/.local/share/pomo/pomo.log. Use RUST_LOG=debug for ticks."#)]
struct Args {
    /// Focus session length in minutes
    #[arg(long, value_name = "MINS")]
    focus: Option<u32>,

    /// Short break length in minutes
    #[arg(long, value_name = "MINS")]
    short_break: Option<u32>,

    /// Long break length in minutes
    #[arg(long, value_name = "MINS")]
    long_break: Option<u32>,

    /// Completed focus sessions before a long break
    #[arg(long, value_name = "N")]
    interval: Option<u32>,

    /// Start the next focus session automatically when a break ends
    #[arg(long)]
    auto_start_focus: bool,

    /// Start breaks automatically when a focus session ends
    #[arg(long)]
    auto_start_breaks: bool,

    /// Mode to start in: focus, short-break or long-break
    #[arg(long, value_name = "MODE", value_parser = parse_mode)]
    mode: Option<Mode>,

    /// Settings file to read instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log file to write instead of the default location
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Args {
    /// Layer command-line overrides on top of `base`
    fn apply_to(&self, base: Settings) -> Settings {
        Settings {
            focus_minutes: self.focus.unwrap_or(base.focus_minutes),
            short_break_minutes: self.short_break.unwrap_or(base.short_break_minutes),
            long_break_minutes: self.long_break.unwrap_or(base.long_break_minutes),
            auto_start_focus: self.auto_start_focus || base.auto_start_focus,
            auto_start_breaks: self.auto_start_breaks || base.auto_start_breaks,
            long_break_interval: self.interval.unwrap_or(base.long_break_interval),
        }
    }
}

fn parse_mode(s: &str) -> Result<Mode, String> {
    Mode::from_str(s).ok_or_else(|| format!("unknown mode '{s}' (focus, short-break, long-break)"))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let paths = Paths::new();

    let log_file = args.log_file.clone().unwrap_or_else(|| paths.log_file());
    pomo_core::logging::init(&log_file)?;

    let config_path = args.config.clone().unwrap_or_else(|| paths.settings_file());
    let settings = args.apply_to(Settings::load(&config_path)?);
    tracing::info!(?settings, config = %config_path.display(), "Starting pomo");

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let controller = TimerController::new(settings, runtime.handle().clone());
    if let Some(mode) = args.mode {
        controller.select_mode(mode);
    }

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(controller);
    let result = run_app(&mut terminal, &mut app);
    app.controller.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!("{err:#}");
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }

    tracing::info!("Exiting pomo");
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.refresh();
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(FRAME_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
