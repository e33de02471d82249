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

//! Playback state machine.
//!
//! [`PlaybackController`] owns the media engine handle and the loaded media
//! reference, and decides when a request needs a fresh load and when it can
//! simply resume what is already loaded.

use std::path::{Path, PathBuf};

use tracing::{debug, info, trace, warn};

use crate::{
    error::PlaybackError,
    model::PlaylistEntry,
    player::{EngineEvent, MediaEngine, PlayerState},
};

/// Highest accepted volume, in percent.
pub(crate) const MAX_VOLUME: i32 = 100;

pub(crate) struct PlaybackController<E> {
    engine: E,
    state: PlayerState,
    loaded: Option<PathBuf>,
    current: Option<PlaylistEntry>,
    volume: u8,
}

impl<E: MediaEngine> PlaybackController<E> {
    pub(crate) fn new(engine: E) -> Self {
        Self {
            engine,
            state: PlayerState::Stopped,
            loaded: None,
            current: None,
            volume: 0,
        }
    }

    pub(crate) fn state(&self) -> PlayerState {
        self.state
    }

    /// The entry most recently started, if it is still loaded.
    pub(crate) fn current(&self) -> Option<&PlaylistEntry> {
        self.current.as_ref()
    }

    pub(crate) fn volume(&self) -> u8 {
        self.volume
    }

    /// Starts playing `entry`.
    ///
    /// The entry's file is loaded only if it is not already the loaded
    /// reference. Re-playing the loaded file resumes from the engine's current
    /// position instead of starting over.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError`] if the file cannot be opened or the engine
    /// refuses to start. The controller is left [`PlayerState::Stopped`].
    pub(crate) fn play(&mut self, entry: &PlaylistEntry) -> Result<(), PlaybackError> {
        let path = Path::new(&entry.path);
        if self.loaded.as_deref() != Some(path) {
            self.load(path)?;
        }

        if let Err(e) = self.engine.play() {
            self.state = PlayerState::Stopped;
            return Err(e);
        }

        self.state = PlayerState::Playing;
        self.current = Some(entry.clone());
        info!(song = %entry.name, "playing");
        Ok(())
    }

    /// Plays `entry` from the start, even if it is already loaded.
    ///
    /// Used when a track ends and the playlist wraps back onto the same file.
    pub(crate) fn replay_or_play(&mut self, entry: &PlaylistEntry) -> Result<(), PlaybackError> {
        if self.loaded.as_deref() == Some(Path::new(&entry.path)) {
            self.engine.seek(0)?;
        }
        self.play(entry)
    }

    fn load(&mut self, path: &Path) -> Result<(), PlaybackError> {
        self.state = PlayerState::Stopped;
        self.current = None;

        // The previous file stays loaded until the engine lets go of it.
        if self.loaded.is_some() {
            self.engine
                .stop()
                .inspect_err(|e| warn!(error = %e, "failed to stop the previous file"))?;
            self.loaded = None;
        }

        match self.engine.load(path) {
            Ok(()) => {
                self.loaded = Some(path.to_path_buf());
                Ok(())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load");
                Err(e)
            }
        }
    }

    pub(crate) fn pause(&mut self) -> Result<(), PlaybackError> {
        if self.state == PlayerState::Playing {
            self.engine.pause()?;
            self.state = PlayerState::Paused;
        }
        Ok(())
    }

    /// Stops playback and rewinds the loaded file to the start.
    pub(crate) fn stop(&mut self) -> Result<(), PlaybackError> {
        if self.state != PlayerState::Stopped {
            self.engine.stop()?;
            self.state = PlayerState::Stopped;
        }
        Ok(())
    }

    /// Seeks within the loaded file. Does nothing if no file is loaded.
    pub(crate) fn set_position(&mut self, position_ms: u64) -> Result<(), PlaybackError> {
        if self.loaded.is_none() {
            return Ok(());
        }
        self.engine.seek(position_ms)
    }

    /// Applies `percent`, clamped to `0..=100`, and returns the value applied.
    pub(crate) fn set_volume(&mut self, percent: i32) -> Result<u8, PlaybackError> {
        let volume = u8::try_from(percent.clamp(0, MAX_VOLUME)).unwrap_or_default();
        self.engine.set_volume(volume)?;
        self.volume = volume;
        Ok(volume)
    }

    /// Returns `(position_ms, duration_ms)` of the loaded file, or zeros when
    /// nothing is loaded.
    pub(crate) fn elapsed_and_total(&self) -> (u64, u64) {
        if self.loaded.is_none() {
            return (0, 0);
        }
        (self.engine.position_ms(), self.engine.duration_ms())
    }

    /// Returns `true` once a playing track has reached its end.
    pub(crate) fn track_finished(&self) -> bool {
        let (position, duration) = self.elapsed_and_total();
        self.state == PlayerState::Playing && duration > 0 && position >= duration
    }

    /// Drains pending engine notifications.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::Open`] if the engine reported that the loaded
    /// file could not be played. The controller is then stopped with nothing
    /// loaded.
    pub(crate) fn poll_engine(&mut self) -> Result<(), PlaybackError> {
        for event in self.engine.poll_events() {
            self.handle_engine_event(event)?;
        }
        Ok(())
    }

    fn handle_engine_event(&mut self, event: EngineEvent) -> Result<(), PlaybackError> {
        match event {
            EngineEvent::LoadFailed(reason) => {
                let path = self.loaded.take().unwrap_or_default();
                self.state = PlayerState::Stopped;
                self.current = None;
                return Err(PlaybackError::Open { path, reason });
            }
            EngineEvent::EndOfFile => debug!("end of file reached"),
            EngineEvent::StateChanged(state) => debug!(?state, "engine state changed"),
            EngineEvent::DurationChanged(ms) => debug!(duration_ms = ms, "duration changed"),
            EngineEvent::PositionChanged(ms) => trace!(position_ms = ms, "position changed"),
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn engine(&self) -> &E {
        &self.engine
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::testing::FakeEngine;

    fn entry(index: usize, name: &str) -> PlaylistEntry {
        PlaylistEntry {
            display_index: index,
            name: name.to_string(),
            path: format!("/music/{name}.mp3"),
        }
    }

    fn controller() -> PlaybackController<FakeEngine> {
        PlaybackController::new(FakeEngine::with_track_length(180_000))
    }

    #[test]
    fn play_loads_and_starts() {
        let mut controller = controller();

        controller.play(&entry(1, "Intro")).unwrap();

        assert_eq!(controller.state(), PlayerState::Playing);
        assert_eq!(controller.engine().loads.len(), 1);
        assert!(controller.engine().playing);
        assert_eq!(controller.current().map(|e| e.name.as_str()), Some("Intro"));
    }

    #[test]
    fn replaying_the_loaded_file_keeps_position() {
        let mut controller = controller();
        let intro = entry(1, "Intro");

        controller.play(&intro).unwrap();
        controller.engine_mut().position_ms = 42_000;
        controller.play(&intro).unwrap();

        assert_eq!(controller.engine().loads.len(), 1);
        assert_eq!(controller.elapsed_and_total(), (42_000, 180_000));
    }

    #[test]
    fn playing_another_file_starts_from_zero() {
        let mut controller = controller();

        controller.play(&entry(1, "Intro")).unwrap();
        controller.engine_mut().position_ms = 42_000;
        controller.play(&entry(2, "Loop")).unwrap();

        assert_eq!(controller.engine().loads.len(), 2);
        assert_eq!(controller.elapsed_and_total().0, 0);
        assert_eq!(controller.current().map(|e| e.name.as_str()), Some("Loop"));
    }

    #[test]
    fn pause_and_resume_do_not_reload() {
        let mut controller = controller();
        let intro = entry(1, "Intro");

        controller.play(&intro).unwrap();
        controller.pause().unwrap();
        assert_eq!(controller.state(), PlayerState::Paused);
        assert!(!controller.engine().playing);

        controller.play(&intro).unwrap();
        assert_eq!(controller.state(), PlayerState::Playing);
        assert_eq!(controller.engine().loads.len(), 1);
    }

    #[test]
    fn pause_while_stopped_is_ignored() {
        let mut controller = controller();

        controller.pause().unwrap();

        assert_eq!(controller.state(), PlayerState::Stopped);
    }

    #[test]
    fn stop_rewinds_and_keeps_file_loaded() {
        let mut controller = controller();
        let intro = entry(1, "Intro");

        controller.play(&intro).unwrap();
        controller.engine_mut().position_ms = 90_000;
        controller.stop().unwrap();

        assert_eq!(controller.state(), PlayerState::Stopped);
        assert_eq!(controller.elapsed_and_total(), (0, 180_000));

        controller.play(&intro).unwrap();
        assert_eq!(controller.engine().loads.len(), 1);
    }

    #[test]
    fn unreadable_file_leaves_controller_stopped() {
        let mut controller = controller();
        let broken = entry(1, "Broken");
        controller
            .engine_mut()
            .unreadable
            .push(PathBuf::from(&broken.path));

        let err = controller.play(&broken).expect_err("load should fail");

        assert!(matches!(err, PlaybackError::Open { .. }));
        assert_eq!(controller.state(), PlayerState::Stopped);
        assert_eq!(controller.current(), None);
        assert_eq!(controller.elapsed_and_total(), (0, 0));
    }

    #[test]
    fn failed_switch_tears_down_the_previous_file() {
        let mut controller = controller();
        let broken = entry(2, "Broken");
        controller
            .engine_mut()
            .unreadable
            .push(PathBuf::from(&broken.path));

        controller.play(&entry(1, "Intro")).unwrap();
        assert!(controller.play(&broken).is_err());

        assert!(!controller.engine().playing);
        assert_eq!(controller.state(), PlayerState::Stopped);
    }

    #[test]
    fn failed_teardown_stops_and_keeps_the_previous_file_loaded() {
        let mut controller = controller();
        controller.play(&entry(1, "Intro")).unwrap();
        controller.engine_mut().position_ms = 42_000;
        controller.engine_mut().stop_fails = true;

        let err = controller.play(&entry(2, "Loop")).expect_err("stop should fail");

        assert!(matches!(err, PlaybackError::Engine(_)));
        assert_eq!(controller.state(), PlayerState::Stopped);
        assert_eq!(controller.current(), None);
        assert_eq!(controller.engine().loads.len(), 1);
        assert_eq!(controller.elapsed_and_total(), (42_000, 180_000));

        controller.engine_mut().stop_fails = false;
        controller.play(&entry(2, "Loop")).unwrap();

        assert_eq!(controller.engine().loads.len(), 2);
        assert_eq!(controller.state(), PlayerState::Playing);
        assert_eq!(controller.elapsed_and_total(), (0, 180_000));
    }

    #[test]
    fn engine_load_failure_stops_playback() {
        let mut controller = controller();
        controller.play(&entry(1, "Intro")).unwrap();
        controller
            .engine_mut()
            .pending
            .push(EngineEvent::LoadFailed("unsupported format".into()));

        let err = controller.poll_engine().expect_err("failure reported");

        assert!(err.to_string().contains("unsupported format"));
        assert_eq!(controller.state(), PlayerState::Stopped);
        assert_eq!(controller.elapsed_and_total(), (0, 0));
    }

    #[test]
    fn seek_without_a_loaded_file_is_ignored() {
        let mut controller = controller();

        controller.set_position(10_000).unwrap();

        assert!(controller.engine().seeks.is_empty());
    }

    #[test]
    fn seek_moves_within_the_loaded_file() {
        let mut controller = controller();
        controller.play(&entry(1, "Intro")).unwrap();

        controller.set_position(10_000).unwrap();

        assert_eq!(controller.elapsed_and_total(), (10_000, 180_000));
    }

    #[test]
    fn volume_is_clamped() {
        let mut controller = controller();

        assert_eq!(controller.set_volume(150).unwrap(), 100);
        assert_eq!(controller.engine().volume, Some(100));
        assert_eq!(controller.set_volume(-5).unwrap(), 0);
        assert_eq!(controller.set_volume(35).unwrap(), 35);
        assert_eq!(controller.volume(), 35);
    }

    #[test]
    fn track_finished_only_while_playing_a_known_length() {
        let mut controller = controller();
        controller.play(&entry(1, "Intro")).unwrap();
        controller.engine_mut().position_ms = 180_000;
        assert!(controller.track_finished());

        controller.pause().unwrap();
        assert!(!controller.track_finished());

        controller.play(&entry(1, "Intro")).unwrap();
        controller.engine_mut().duration_ms = 0;
        assert!(!controller.track_finished());
    }

    #[test]
    fn replay_rewinds_the_loaded_file() {
        let mut controller = controller();
        let intro = entry(1, "Intro");
        controller.play(&intro).unwrap();
        controller.engine_mut().position_ms = 180_000;

        controller.replay_or_play(&intro).unwrap();

        assert_eq!(controller.engine().loads.len(), 1);
        assert_eq!(controller.elapsed_and_total().0, 0);
        assert!(!controller.track_finished());
    }
}
