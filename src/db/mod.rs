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

//! Data access layer.
//!
//! This module handles all interactions with the SQLite playlist database. A
//! fresh connection is opened for every operation and dropped when it
//! completes, so no lock outlives the call that took it.
//!
//! # Tables
//!
//! * `playlist` - One row per imported song, ordered by its auto-incremented
//!   id. The schema is shared with existing `playlist.db` files and must not
//!   change.

mod model;
pub(crate) mod scan;

use std::path::{Path, PathBuf};

use rusqlite::{Connection, params};
use tracing::{debug, info};

use crate::{
    error::StorageError,
    model::{NewSong, Song},
};

/// The durable playlist, stored in a single SQLite file.
#[derive(Debug, Clone)]
pub(crate) struct PlaylistStore {
    path: PathBuf,
}

impl PlaylistStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, StorageError> {
        Ok(Connection::open(&self.path)?)
    }

    /// Creates the `playlist` table if it does not already exist.
    ///
    /// This is idempotent and is called on every start-up.
    ///
    /// # Errors
    ///
    /// Returns an error if the database file cannot be opened or created, or
    /// if the schema statement fails.
    pub(crate) fn initialize(&self) -> Result<(), StorageError> {
        let conn = self.connect()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS playlist (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                song_name TEXT NOT NULL,
                song_path TEXT NOT NULL
            );",
        )?;

        info!(path = %self.path.display(), "playlist store ready");
        Ok(())
    }

    /// Appends a single song to the playlist.
    pub(crate) fn insert(&self, name: &str, path: &str) -> Result<(), StorageError> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO playlist (song_name, song_path) VALUES (?1, ?2)",
            params![name, path],
        )?;

        debug!(song = name, path, "song inserted");
        Ok(())
    }

    /// Appends songs to the playlist in order.
    ///
    /// All inserts happen in one transaction, so either every song is added or
    /// none are.
    ///
    /// # Returns
    ///
    /// Returns the number of songs inserted.
    pub(crate) fn insert_all(&self, songs: &[NewSong]) -> Result<usize, StorageError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        {
            let mut stmt =
                tx.prepare("INSERT INTO playlist (song_name, song_path) VALUES (?1, ?2)")?;
            for song in songs {
                stmt.execute(params![song.name, song.path])?;
            }
        }
        tx.commit()?;

        debug!(count = songs.len(), "songs inserted");
        Ok(songs.len())
    }

    /// Fetches every song, ordered by ascending id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be mapped to a
    /// [`Song`].
    pub(crate) fn list_all(&self) -> Result<Vec<Song>, StorageError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT id, song_name, song_path FROM playlist ORDER BY id")?;
        let results = stmt
            .query_map([], Song::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(results)
    }

    /// Deletes every song and resets the id sequence, so the next insert is
    /// assigned id 1.
    ///
    /// Both statements run in one transaction. If either fails nothing is
    /// committed and the playlist is left as it was.
    pub(crate) fn clear_all(&self) -> Result<(), StorageError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let deleted = tx.execute("DELETE FROM playlist", [])?;
        tx.execute("DELETE FROM sqlite_sequence WHERE name = 'playlist'", [])?;
        tx.commit()?;

        info!(deleted, "playlist cleared");
        Ok(())
    }
}
