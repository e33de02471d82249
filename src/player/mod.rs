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

//! Audio playback control and state management.
//!
//! This module defines the [`MediaEngine`] seam between the application and
//! the library doing the actual decoding and output, and the
//! [`PlaybackController`] that drives it. The production engine is
//! [`MpvEngine`]. Tests drive the controller with a recording fake instead.

pub(crate) mod backend;
pub(crate) mod controller;
#[cfg(test)]
pub(crate) mod testing;

use std::path::Path;

use crate::error::PlaybackError;

pub(crate) use controller::PlaybackController;
pub(crate) use backend::MpvEngine;

/// Represents the current playback status of the audio engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PlayerState {
    Playing,
    Paused,
    Stopped,
}

/// Notifications raised by a media engine, drained with
/// [`MediaEngine::poll_events`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum EngineEvent {
    PositionChanged(u64),
    DurationChanged(u64),
    StateChanged(PlayerState),
    /// The loaded resource played through to its end.
    EndOfFile,
    /// The engine gave up on the resource it was asked to load.
    LoadFailed(String),
}

/// A single media playback handle.
///
/// Positions and durations are in milliseconds. An engine holds at most one
/// loaded resource; [`MediaEngine::load`] replaces whatever was there.
pub(crate) trait MediaEngine {
    /// Opens `path`, replacing the current resource. Playback does not start
    /// until [`MediaEngine::play`] is called.
    fn load(&mut self, path: &Path) -> Result<(), PlaybackError>;

    fn play(&mut self) -> Result<(), PlaybackError>;

    fn pause(&mut self) -> Result<(), PlaybackError>;

    /// Halts playback and rewinds to the start, keeping the resource loaded.
    fn stop(&mut self) -> Result<(), PlaybackError>;

    fn seek(&mut self, position_ms: u64) -> Result<(), PlaybackError>;

    /// Sets the output volume, `0..=100`.
    fn set_volume(&mut self, percent: u8) -> Result<(), PlaybackError>;

    fn position_ms(&self) -> u64;

    fn duration_ms(&self) -> u64;

    /// Returns every notification raised since the last call, oldest first.
    fn poll_events(&mut self) -> Vec<EngineEvent>;
}
