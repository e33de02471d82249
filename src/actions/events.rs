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

//! Application event distribution and orchestration.
//!
//! This module defines the central event-handling logic for the application,
//! bridging the gap between user input, the periodic tick and the UI
//! rendering pipeline.
//!
//! # Architecture
//!
//! The system follows a reactive event-loop pattern:
//!
//! 1. **Capture**: Events are received via the [`AppEvent`] enum through a
//!    channel fed by the key reader and tick threads.
//! 2. **Process**: The [`process_events`] function turns each event into an
//!    [`AppCommand`] (or a session tick) and applies it on this thread.
//! 3. **Render**: After each event is processed, the UI is re-drawn using the
//!    `ratatui` terminal.

use std::io::Stdout;

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, prelude::CrosstermBackend};
use tracing::warn;

use crate::{
    App,
    actions::commands::{AppCommand, dispatch},
    error::AppError,
    player::PlayerState,
    render::draw,
};

/// Volume change applied by the volume keys, in percent.
const VOLUME_DELTA: i32 = 5;

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),
    Tick,
    Command(AppCommand),
    /// A message for the status line that did not come from a failed command.
    Notice(String),
    ExitApplication,
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until an exit event is received or the event channel
/// is closed.
///
/// # Errors
///
/// Returns an error if the terminal cannot be drawn, or if a command fails in
/// a way that means the playlist no longer matches the store.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        match event {
            AppEvent::ExitApplication => break,
            AppEvent::Key(key) => process_key_event(app, key)?,
            AppEvent::Tick => {
                let result = app.session.tick();
                report(app, result)?;
            }
            AppEvent::Command(command) => run_command(app, command)?,
            AppEvent::Notice(message) => app.status = Some(message),
        }

        app.playlist_view.sync(app.session.playlist().len());

        // Render after every event processed
        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}

fn run_command(app: &mut App, command: AppCommand) -> Result<()> {
    app.status = None;
    let result = dispatch(&mut app.session, command);
    report(app, result)
}

/// Shows a non-fatal error in the status line, or ends the event loop for a
/// fatal one.
fn report(app: &mut App, result: Result<(), AppError>) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.is_fatal() => anyhow::bail!("Playlist out of sync: {e}"),
        Err(e) => {
            warn!(error = %e, "command failed");
            app.status = Some(e.to_string());
            Ok(())
        }
    }
}

/// Maps keyboard input to playback commands and playlist navigation.
///
/// The command prompt gets the first chance at every key; while it is open
/// it consumes all of them.
fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    if app.commander.handle_event(&Event::Key(key), &app.event_tx) {
        return Ok(());
    }

    let (position, _) = app.session.controller().elapsed_and_total();
    let volume = i32::from(app.session.controller().volume());
    let seek_step = app.config.seek_step_ms;

    let command = match key.code {
        KeyCode::Char('q') => {
            app.event_tx.send(AppEvent::ExitApplication)?;
            None
        }

        // Playlist navigation
        KeyCode::Char('j') | KeyCode::Down => {
            app.playlist_view.next(app.session.playlist().len());
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.playlist_view.previous(app.session.playlist().len());
            None
        }
        KeyCode::Enter => app.playlist_view.selected().map(AppCommand::SelectRow),

        // Playback controls
        KeyCode::Char('p') => Some(AppCommand::Play),
        KeyCode::Char(' ') => match app.session.controller().state() {
            PlayerState::Playing => Some(AppCommand::Pause),
            _ => Some(AppCommand::Play),
        },
        KeyCode::Char('s') => Some(AppCommand::Stop),
        KeyCode::Char('n') => Some(AppCommand::Next),
        KeyCode::Char('b') => Some(AppCommand::Prev),
        KeyCode::Char(',') => Some(AppCommand::Seek(position.saturating_sub(seek_step))),
        KeyCode::Char('.') => Some(AppCommand::Seek(position + seek_step)),
        KeyCode::Char('-') => Some(AppCommand::SetVolume(volume - VOLUME_DELTA)),
        KeyCode::Char('=') | KeyCode::Char('+') => {
            Some(AppCommand::SetVolume(volume + VOLUME_DELTA))
        }

        // Playlist management
        KeyCode::Char('c') => Some(AppCommand::Clear),

        _ => None,
    };

    match command {
        Some(command) => run_command(app, command),
        None => Ok(()),
    }
}
