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

//! Domain models and core data structures.
//!
//! This module defines the song records persisted by the playlist store and
//! the entries displayed by the playlist view model.

pub(crate) mod playlist;

/// A song as persisted in the playlist table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Song {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) path: String,
}

/// A song waiting to be inserted, before the store has assigned it an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NewSong {
    pub(crate) name: String,
    pub(crate) path: String,
}

impl NewSong {
    pub(crate) fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// A displayed playlist row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlaylistEntry {
    /// 1-based position shown to the user.
    pub(crate) display_index: usize,
    pub(crate) name: String,
    pub(crate) path: String,
}

impl PlaylistEntry {
    /// The label shown in the playlist, e.g. `3. Intro`.
    pub(crate) fn label(&self) -> String {
        format!("{}. {}", self.display_index, self.name)
    }
}

/// Direction of travel through the playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Backward,
}
