// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Audio Player TUI.
//!
//! A terminal audio player with a persisted playlist.
//!
//! This application coordinates a TUI frontend built with `ratatui`, a SQLite
//! playlist store and an MPV playback engine.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** owns the playlist, the player and the terminal, and
//!   is the only thread that changes them.
//! * **Feeder Threads** read keys and emit a once-a-second tick, posting both
//!   into the main thread's event channel.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of an error. Communication
//! from the feeder threads is handled via `std::sync::mpsc` channels.

mod actions;
mod commander;
mod components;
mod config;
mod db;
mod error;
mod model;
mod player;
mod render;
mod session;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    fs::OpenOptions,
    io::{self},
    path::PathBuf,
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    actions::{
        commands::AppCommand,
        events::{AppEvent, process_events},
    },
    commander::Commander,
    components::PlaylistView,
    config::{AppConfig, ConfyPreferences},
    db::PlaylistStore,
    player::MpvEngine,
    session::Session,
    theme::Theme,
};

/// Interval between position checks, which also drives end-of-track detection.
const TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Application state.
struct App {
    pub config: AppConfig,

    pub theme: Theme,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub session: Session<MpvEngine>,

    pub playlist_view: PlaylistView,
    pub commander: Commander,

    /// Latest error or notice, shown until the next command.
    pub status: Option<String>,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig, session: Session<MpvEngine>) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        let mut playlist_view = PlaylistView::new();
        playlist_view.sync(session.playlist().len());

        Self {
            config,
            theme: Theme::default(),
            event_tx,
            event_rx,
            session,
            playlist_view,
            commander: Commander::new(),
            status: None,
        }
    }
}

/// The entry point of the application.
///
/// Opens the playlist and the media engine, manages the terminal lifecycle,
/// and returns an error if any part of the execution fails.
///
/// Any command-line arguments are imported into the playlist as files or
/// folders before the interface starts.
fn main() -> Result<()> {
    let loaded = config::load_config();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    init_logging(&config)?;
    info!("tunedeck starting");
    if let Err(e) = &loaded {
        warn!(error = %e, "unreadable configuration, using defaults");
    }

    let engine = MpvEngine::new().context("Failed to initialise media engine")?;
    let store = PlaylistStore::new(&config.database_file);
    let session = Session::open(store, engine, Box::new(ConfyPreferences))
        .context("Failed to open playlist")?;

    let mut app = App::new(config, session);

    let picked: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if !picked.is_empty() {
        app.event_tx.send(AppEvent::Command(AppCommand::AddPaths(picked)))?;
    }

    let mut terminal = setup_terminal()?;
    let res = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal);

    info!("tunedeck exiting");
    res.context("Application error occurred")
}

/// Routes `tracing` output to the configured log file.
///
/// The terminal is owned by the UI, so nothing is logged to it. `RUST_LOG`
/// overrides the default `info` level.
fn init_logging(config: &AppConfig) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("Failed to open log file {}", config.log_file))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    Ok(())
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`] and makes the cursor
/// visible again. It is best-effort and does not return a result, as it is
/// called during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();
}

/// Starts the feeder threads and enters the main event loop.
///
/// This function spawns two long-running background threads:
/// * An input thread to poll for system keyboard events.
/// * A tick thread that drives position updates and end-of-track detection.
///
/// Neither thread touches application state; both only post events.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(event::Event::Key(key)) = event::read() {
                if tx_keys.send(AppEvent::Key(key)).is_err() {
                    break;
                }
            }
        }
    });

    // Spawn a thread to send a periodic tick application event.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
