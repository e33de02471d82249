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

//! A recording [`MediaEngine`] for tests.

use std::path::{Path, PathBuf};

use crate::{
    error::PlaybackError,
    player::{EngineEvent, MediaEngine},
};

#[derive(Debug, Default)]
pub(crate) struct FakeEngine {
    /// Duration given to every file once loaded.
    pub(crate) track_length_ms: u64,
    /// Paths that fail to load.
    pub(crate) unreadable: Vec<PathBuf>,
    /// Makes `stop` fail.
    pub(crate) stop_fails: bool,
    /// Events returned by the next poll.
    pub(crate) pending: Vec<EngineEvent>,

    pub(crate) loads: Vec<PathBuf>,
    pub(crate) seeks: Vec<u64>,
    pub(crate) playing: bool,
    pub(crate) position_ms: u64,
    pub(crate) duration_ms: u64,
    pub(crate) volume: Option<u8>,
}

impl FakeEngine {
    pub(crate) fn with_track_length(track_length_ms: u64) -> Self {
        Self {
            track_length_ms,
            ..Self::default()
        }
    }
}

impl MediaEngine for FakeEngine {
    fn load(&mut self, path: &Path) -> Result<(), PlaybackError> {
        if self.unreadable.iter().any(|p| p == path) {
            return Err(PlaybackError::Open {
                path: path.to_path_buf(),
                reason: "No such file or directory".into(),
            });
        }
        self.loads.push(path.to_path_buf());
        self.playing = false;
        self.position_ms = 0;
        self.duration_ms = self.track_length_ms;
        Ok(())
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlaybackError> {
        self.playing = false;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), PlaybackError> {
        if self.stop_fails {
            return Err(PlaybackError::Engine("stop rejected".into()));
        }
        self.playing = false;
        self.position_ms = 0;
        Ok(())
    }

    fn seek(&mut self, position_ms: u64) -> Result<(), PlaybackError> {
        self.seeks.push(position_ms);
        self.position_ms = position_ms;
        Ok(())
    }

    fn set_volume(&mut self, percent: u8) -> Result<(), PlaybackError> {
        self.volume = Some(percent);
        Ok(())
    }

    fn position_ms(&self) -> u64 {
        self.position_ms
    }

    fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.pending)
    }
}
