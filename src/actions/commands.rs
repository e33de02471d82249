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

//! Application command dispatch.
//!
//! This module implements the command pattern that decouples the user
//! interface from the playlist and playback logic. Every gesture the shell
//! understands is translated into one [`AppCommand`] and handed to
//! [`dispatch`], so the whole control surface can be driven without a
//! terminal.

use std::path::PathBuf;

use tracing::debug;

use crate::{error::AppError, model::Direction, player::MediaEngine, session::Session};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AppCommand {
    Play,
    Pause,
    Stop,
    Next,
    Prev,
    Clear,
    SetVolume(i32),
    Seek(u64),
    SelectRow(usize),
    AddPaths(Vec<PathBuf>),
}

/// Executes a single command against the session.
///
/// # Errors
///
/// Storage and playback failures are returned for the caller to report; the
/// session stays usable afterwards. An [`AppError::Index`] means the caller
/// addressed a row that does not exist.
pub(crate) fn dispatch<E: MediaEngine>(
    session: &mut Session<E>,
    command: AppCommand,
) -> Result<(), AppError> {
    debug!(?command, "dispatching command");

    match command {
        AppCommand::Play => session.play_selected(),
        AppCommand::Pause => session.pause(),
        AppCommand::Stop => session.stop(),
        AppCommand::Next => session.step(Direction::Forward),
        AppCommand::Prev => session.step(Direction::Backward),
        AppCommand::Clear => session.clear(),
        AppCommand::SetVolume(percent) => session.set_volume(percent),
        AppCommand::Seek(position_ms) => session.seek(position_ms),
        AppCommand::SelectRow(row) => session.select_row(row),
        AppCommand::AddPaths(paths) => session.add_paths(&paths).map(|_| ()),
    }
}
