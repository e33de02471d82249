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

//! Playlist and playback coordination.
//!
//! A [`Session`] owns the playlist store, its in-memory view model, the
//! playback controller and the preference store. Every playlist mutation goes
//! to the store first and the view model is then rebuilt from a fresh read,
//! before the call returns.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::{
    config::{PreferenceStore, Preferences},
    db::{PlaylistStore, scan},
    error::{AppError, StorageError},
    model::{Direction, playlist::Playlist},
    player::{MediaEngine, PlaybackController},
};

pub(crate) struct Session<E> {
    store: PlaylistStore,
    playlist: Playlist,
    controller: PlaybackController<E>,
    preferences: Box<dyn PreferenceStore>,
}

impl<E: MediaEngine> Session<E> {
    /// Prepares the store, loads the playlist and restores the saved volume.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be initialised or read, or if the
    /// engine rejects the saved volume.
    pub(crate) fn open(
        store: PlaylistStore,
        engine: E,
        preferences: Box<dyn PreferenceStore>,
    ) -> Result<Self, AppError> {
        store.initialize()?;

        let mut session = Self {
            store,
            playlist: Playlist::new(),
            controller: PlaybackController::new(engine),
            preferences,
        };
        session.reload()?;

        let saved = session.preferences.load();
        if saved.slider_position != saved.volume {
            debug!(
                volume = saved.volume,
                slider_position = saved.slider_position,
                "slider position differs from volume, using volume"
            );
        }
        session.controller.set_volume(saved.volume)?;

        info!(
            path = %session.store.path().display(),
            songs = session.playlist.len(),
            volume = saved.volume,
            "session opened"
        );
        Ok(session)
    }

    pub(crate) fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub(crate) fn controller(&self) -> &PlaybackController<E> {
        &self.controller
    }

    fn reload(&mut self) -> Result<(), StorageError> {
        let songs = self.store.list_all()?;
        self.playlist.rebuild_from(&songs);
        Ok(())
    }

    fn play_row(&mut self, row: usize) -> Result<(), AppError> {
        let entry = self.playlist.entry_at(row)?.clone();
        self.controller.play(&entry)?;
        Ok(())
    }

    /// Plays (or resumes) the song under the cursor, if any.
    pub(crate) fn play_selected(&mut self) -> Result<(), AppError> {
        match self.playlist.cursor() {
            Some(row) => self.play_row(row),
            None => {
                debug!("play requested with nothing selected");
                Ok(())
            }
        }
    }

    pub(crate) fn select_row(&mut self, row: usize) -> Result<(), AppError> {
        self.playlist.set_cursor(row)?;
        self.play_row(row)
    }

    /// Moves the cursor one song in `direction`, wrapping at either end, and
    /// plays it.
    pub(crate) fn step(&mut self, direction: Direction) -> Result<(), AppError> {
        let Some(row) = self.playlist.advance(self.playlist.cursor(), direction) else {
            return Ok(());
        };
        self.select_row(row)
    }

    pub(crate) fn pause(&mut self) -> Result<(), AppError> {
        Ok(self.controller.pause()?)
    }

    pub(crate) fn stop(&mut self) -> Result<(), AppError> {
        Ok(self.controller.stop()?)
    }

    pub(crate) fn seek(&mut self, position_ms: u64) -> Result<(), AppError> {
        Ok(self.controller.set_position(position_ms)?)
    }

    /// Applies a volume level and persists it.
    pub(crate) fn set_volume(&mut self, percent: i32) -> Result<(), AppError> {
        let volume = i32::from(self.controller.set_volume(percent)?);
        self.preferences.save(&Preferences {
            volume,
            slider_position: volume,
        })?;
        Ok(())
    }

    /// Imports songs from picked files and folders.
    ///
    /// # Returns
    ///
    /// Returns the number of songs added.
    pub(crate) fn add_paths(&mut self, paths: &[PathBuf]) -> Result<usize, AppError> {
        let songs = scan::collect_songs(paths)?;
        let count = self.store.insert_all(&songs)?;
        self.reload()?;

        info!(count, "songs added");
        Ok(count)
    }

    /// Empties the playlist and unsets the cursor. A song that is already
    /// playing carries on.
    pub(crate) fn clear(&mut self) -> Result<(), AppError> {
        self.store.clear_all()?;
        self.playlist.reset_cursor();
        self.reload()?;
        Ok(())
    }

    /// Processes engine notifications and moves on to the next song when the
    /// current one has finished.
    pub(crate) fn tick(&mut self) -> Result<(), AppError> {
        self.controller.poll_engine()?;

        if !self.controller.track_finished() {
            return Ok(());
        }

        let Some(next) = self
            .playlist
            .advance(self.playlist.cursor(), Direction::Forward)
        else {
            // The playlist was cleared under a playing song.
            self.controller.stop()?;
            return Ok(());
        };

        self.playlist.set_cursor(next)?;
        let entry = self.playlist.entry_at(next)?.clone();
        info!(row = next, song = %entry.name, "track finished, advancing");
        self.controller.replay_or_play(&entry)?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn controller_mut(&mut self) -> &mut PlaybackController<E> {
        &mut self.controller
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use tempfile::{TempDir, tempdir};

    use super::*;
    use crate::{config::testing::MemoryPreferences, player::testing::FakeEngine};

    pub(crate) const TRACK_LENGTH_MS: u64 = 180_000;

    pub(crate) struct Fixture {
        _dir: TempDir,
        pub(crate) store: PlaylistStore,
        pub(crate) preferences: MemoryPreferences,
    }

    impl Fixture {
        /// A temporary store seeded with `(name, path)` songs.
        pub(crate) fn with_songs(songs: &[(&str, &str)]) -> Self {
            let dir = tempdir().expect("tempdir");
            let store = PlaylistStore::new(dir.path().join("playlist.db"));
            store.initialize().expect("initialize");
            for (name, path) in songs {
                store.insert(name, path).expect("insert");
            }
            Self {
                _dir: dir,
                store,
                preferences: MemoryPreferences::default(),
            }
        }

        pub(crate) fn open(&self) -> Session<FakeEngine> {
            Session::open(
                self.store.clone(),
                FakeEngine::with_track_length(TRACK_LENGTH_MS),
                Box::new(self.preferences.clone()),
            )
            .expect("open session")
        }
    }

    /// Moves the playing song to its end.
    pub(crate) fn finish_track(session: &mut Session<FakeEngine>) {
        let engine = session.controller_mut().engine_mut();
        engine.position_ms = engine.duration_ms;
    }
}
