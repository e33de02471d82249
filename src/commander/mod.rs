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

//! Command-line input logic and state management.
//!
//! This module implements the `:` prompt. It manages a text input component
//! and, when a command is submitted, posts the matching application event.
//! The prompt also stands in for a file picker: `:add <path>` imports a file
//! or a folder of songs.
//!
//! # Commands
//!
//! * `add <path>[;<path>...]` - Import files, or every `mp3` file in a folder.
//! * `play`, `pause`, `stop`, `next`, `prev` - Playback controls.
//! * `v <percent>` - Set the volume.
//! * `seek <m:ss>` or `seek <seconds>` - Jump within the current song.
//! * `clear` - Empty the playlist.
//! * `q` - Quit.

use std::{path::PathBuf, sync::mpsc::Sender};

use crossterm::event::{Event, KeyCode};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::actions::{commands::AppCommand, events::AppEvent};

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Feeds a terminal event to the prompt.
    ///
    /// Returns `true` if the prompt consumed the event.
    pub(crate) fn handle_event(&mut self, event: &Event, event_tx: &Sender<AppEvent>) -> bool {
        let Event::Key(key_event) = event else {
            return false;
        };

        if !self.active {
            if key_event.code == KeyCode::Char(':') {
                self.active = true;
                return true;
            }
            return false;
        }

        match key_event.code {
            KeyCode::Esc => {
                self.active = false;
                self.input.reset();
            }

            KeyCode::Enter => {
                let buffer = self.input.value().trim();
                if !buffer.is_empty() {
                    let event = match parse_command(buffer) {
                        Ok(Some(command)) => AppEvent::Command(command),
                        Ok(None) => AppEvent::ExitApplication,
                        Err(message) => AppEvent::Notice(message),
                    };
                    let _ = event_tx.send(event);
                }
                self.input.reset();
                self.active = false;
            }

            _ => {
                // Delegate all other key events to the managed input component.
                self.input.handle_event(event);
            }
        }

        true
    }
}

/// Separates the paths given to `add`.
const PATH_SEPARATOR: char = ';';

/// Parses a prompt line.
///
/// `add` takes one or more paths separated by `;`. Returns `Ok(None)` for the quit command.
///
/// # Errors
///
/// Returns a message for the status line if the command is unknown or its
/// argument is invalid.
pub(crate) fn parse_command(buffer: &str) -> Result<Option<AppCommand>, String> {
    let (name, argument) = match buffer.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (buffer, ""),
    };

    let command = match (name, argument) {
        ("q", "") => return Ok(None),

        ("add", paths) => {
            let paths: Vec<PathBuf> = paths
                .split(PATH_SEPARATOR)
                .map(str::trim)
                .filter(|path| !path.is_empty())
                .map(PathBuf::from)
                .collect();
            if paths.is_empty() {
                return Err("add: expected a file or folder path".to_string());
            }
            AppCommand::AddPaths(paths)
        }

        ("play", "") => AppCommand::Play,
        ("pause", "") => AppCommand::Pause,
        ("stop", "") => AppCommand::Stop,
        ("next", "") => AppCommand::Next,
        ("prev", "") => AppCommand::Prev,
        ("clear", "") => AppCommand::Clear,

        ("v", percent) => percent
            .parse()
            .map(AppCommand::SetVolume)
            .map_err(|_| format!("v: invalid volume '{percent}'"))?,

        ("seek", position) => parse_position(position)
            .map(AppCommand::Seek)
            .ok_or_else(|| format!("seek: invalid position '{position}'"))?,

        _ => return Err(format!("Unknown command: {buffer}")),
    };

    Ok(Some(command))
}

// Accepts `m:ss` or a plain number of seconds, returning milliseconds.
fn parse_position(text: &str) -> Option<u64> {
    let seconds = match text.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes: u64 = minutes.parse().ok()?;
            let seconds: u64 = seconds.parse().ok()?;
            if seconds >= 60 {
                return None;
            }
            minutes * 60 + seconds
        }
        None => text.parse().ok()?,
    };
    Some(seconds * 1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_playback_commands() {
        assert_eq!(parse_command("play"), Ok(Some(AppCommand::Play)));
        assert_eq!(parse_command("next"), Ok(Some(AppCommand::Next)));
        assert_eq!(parse_command("clear"), Ok(Some(AppCommand::Clear)));
        assert_eq!(parse_command("q"), Ok(None));
    }

    #[test]
    fn add_keeps_spaces_in_the_path() {
        assert_eq!(
            parse_command("add /music/Best Of/01 Intro.mp3"),
            Ok(Some(AppCommand::AddPaths(vec![PathBuf::from(
                "/music/Best Of/01 Intro.mp3"
            )])))
        );
        assert!(parse_command("add").is_err());
    }

    #[test]
    fn add_accepts_several_paths() {
        assert_eq!(
            parse_command("add /music/a.mp3; /music/Best Of ;/music/b.mp3;"),
            Ok(Some(AppCommand::AddPaths(vec![
                PathBuf::from("/music/a.mp3"),
                PathBuf::from("/music/Best Of"),
                PathBuf::from("/music/b.mp3"),
            ])))
        );
        assert!(parse_command("add ; ;").is_err());
    }

    #[test]
    fn volume_is_passed_through_unclamped() {
        assert_eq!(parse_command("v 150"), Ok(Some(AppCommand::SetVolume(150))));
        assert_eq!(parse_command("v -5"), Ok(Some(AppCommand::SetVolume(-5))));
        assert!(parse_command("v loud").is_err());
    }

    #[test]
    fn seek_accepts_minutes_or_seconds() {
        assert_eq!(parse_command("seek 1:30"), Ok(Some(AppCommand::Seek(90_000))));
        assert_eq!(parse_command("seek 45"), Ok(Some(AppCommand::Seek(45_000))));
        assert!(parse_command("seek 1:75").is_err());
        assert!(parse_command("seek").is_err());
    }

    #[test]
    fn unknown_commands_are_rejected() {
        assert_eq!(
            parse_command("shuffle"),
            Err("Unknown command: shuffle".to_string())
        );
        assert!(parse_command("play now").is_err());
    }
}
