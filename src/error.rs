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

//! Error types shared by the playlist store, view model and playback
//! controller.
//!
//! Storage and playback failures are reported to the user and the application
//! keeps running. An [`IndexError`] means the view model and the store have
//! drifted apart, so [`AppError::is_fatal`] treats it as unrecoverable.

use std::path::PathBuf;

use thiserror::Error;

/// A failure reading or writing the durable playlist.
#[derive(Debug, Error)]
pub(crate) enum StorageError {
    #[error("playlist database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A failure opening a media resource or driving the media engine.
#[derive(Debug, Error)]
pub(crate) enum PlaybackError {
    #[error("cannot open {path}: {reason}")]
    Open { path: PathBuf, reason: String },

    #[error("media engine failure: {0}")]
    Engine(String),
}

/// A playlist row outside the bounds of the current playlist.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("playlist row {row} out of range for {len} entries")]
pub(crate) struct IndexError {
    pub(crate) row: usize,
    pub(crate) len: usize,
}

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error("failed to save preferences: {0}")]
    Preferences(#[from] confy::ConfyError),
}

impl AppError {
    /// Returns `true` for errors that indicate a logic fault rather than an
    /// environmental failure.
    pub(crate) fn is_fatal(&self) -> bool {
        matches!(self, AppError::Index(_))
    }
}
