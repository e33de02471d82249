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

//! Playlist view model.
//!
//! This module provides the in-memory mirror of the playlist store. The
//! playlist is always rebuilt wholesale from a full ordered scan of the store,
//! never patched, so it cannot drift from what is on disk.

use tracing::debug;

use crate::{
    error::IndexError,
    model::{Direction, PlaylistEntry, Song},
};

#[derive(Debug, Default)]
pub(crate) struct Playlist {
    entries: Vec<PlaylistEntry>,
    cursor: Option<usize>,
}

impl Playlist {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Replaces every entry with the given records, numbered from 1 in the
    /// order supplied.
    ///
    /// The cursor is kept if it still addresses a row, otherwise it is unset.
    pub(crate) fn rebuild_from(&mut self, records: &[Song]) {
        self.entries = records
            .iter()
            .enumerate()
            .map(|(i, song)| PlaylistEntry {
                display_index: i + 1,
                name: song.name.clone(),
                path: song.path.clone(),
            })
            .collect();

        if self.cursor.is_some_and(|row| row >= self.entries.len()) {
            self.cursor = None;
        }

        debug!(entries = self.entries.len(), cursor = ?self.cursor, "playlist rebuilt");
    }

    /// Returns the entry displayed at `row`.
    ///
    /// # Errors
    ///
    /// Returns an [`IndexError`] if `row` is outside the playlist.
    pub(crate) fn entry_at(&self, row: usize) -> Result<&PlaylistEntry, IndexError> {
        self.entries.get(row).ok_or(IndexError {
            row,
            len: self.entries.len(),
        })
    }

    /// Computes the row after (or before) `cursor`, wrapping at both ends.
    ///
    /// An unset cursor moves to the first row going forward and to the last
    /// row going backward. An empty playlist always yields `None`.
    pub(crate) fn advance(&self, cursor: Option<usize>, direction: Direction) -> Option<usize> {
        let len = self.entries.len();
        if len == 0 {
            return None;
        }

        let next = match (cursor, direction) {
            (None, Direction::Forward) => 0,
            (None, Direction::Backward) => len - 1,
            (Some(row), Direction::Forward) => (row + 1) % len,
            (Some(row), Direction::Backward) => (row % len + len - 1) % len,
        };

        Some(next)
    }

    pub(crate) fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub(crate) fn set_cursor(&mut self, row: usize) -> Result<(), IndexError> {
        self.entry_at(row)?;
        self.cursor = Some(row);
        Ok(())
    }

    pub(crate) fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    pub(crate) fn entries(&self) -> &[PlaylistEntry] {
        &self.entries
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn songs(names: &[&str]) -> Vec<Song> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Song {
                id: i as i64 + 1,
                name: name.to_string(),
                path: format!("/music/{name}.mp3"),
            })
            .collect()
    }

    #[test]
    fn rebuild_numbers_entries_from_one() {
        let mut playlist = Playlist::new();
        playlist.rebuild_from(&songs(&["Intro", "Loop", "Outro"]));

        assert_eq!(playlist.len(), 3);
        let entry = playlist.entry_at(2).unwrap();
        assert_eq!(entry.display_index, 3);
        assert_eq!(entry.path, "/music/Outro.mp3");
        assert_eq!(entry.label(), "3. Outro");
    }

    #[test]
    fn entry_at_out_of_range_is_an_error() {
        let mut playlist = Playlist::new();
        playlist.rebuild_from(&songs(&["Intro"]));

        assert_eq!(playlist.entry_at(1), Err(IndexError { row: 1, len: 1 }));
    }

    #[test]
    fn advance_wraps_in_both_directions() {
        let mut playlist = Playlist::new();
        playlist.rebuild_from(&songs(&["a", "b", "c"]));

        assert_eq!(playlist.advance(None, Direction::Forward), Some(0));
        assert_eq!(playlist.advance(None, Direction::Backward), Some(2));
        assert_eq!(playlist.advance(Some(2), Direction::Forward), Some(0));
        assert_eq!(playlist.advance(Some(0), Direction::Backward), Some(2));
        assert_eq!(playlist.advance(Some(1), Direction::Forward), Some(2));
        assert_eq!(playlist.advance(Some(1), Direction::Backward), Some(0));
    }

    #[test]
    fn advance_on_empty_playlist_stays_unset() {
        let playlist = Playlist::new();

        assert_eq!(playlist.advance(None, Direction::Forward), None);
        assert_eq!(playlist.advance(Some(3), Direction::Backward), None);
    }

    #[test]
    fn rebuild_keeps_cursor_only_while_in_range() {
        let mut playlist = Playlist::new();
        playlist.rebuild_from(&songs(&["a", "b", "c"]));
        playlist.set_cursor(2).unwrap();

        playlist.rebuild_from(&songs(&["a", "b", "c", "d"]));
        assert_eq!(playlist.cursor(), Some(2));

        playlist.rebuild_from(&songs(&["a"]));
        assert_eq!(playlist.cursor(), None);
    }

    #[test]
    fn set_cursor_rejects_missing_rows() {
        let mut playlist = Playlist::new();
        playlist.rebuild_from(&songs(&["a"]));

        assert!(playlist.set_cursor(1).is_err());
        assert_eq!(playlist.cursor(), None);
    }
}
