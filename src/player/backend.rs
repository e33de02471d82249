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

//! MPV-backed media engine.
//!
//! This module provides the production [`MediaEngine`], leveraging `libmpv`
//! for decoding and audio output. The handle is owned by the UI thread and
//! polled without blocking, so property observations queued by MPV are turned
//! into [`EngineEvent`]s only when the application asks for them.
//!
//! MPV is configured with `keep-open=yes` so a finished file stays loaded and
//! paused at its end rather than being unloaded. That keeps the loaded
//! reference valid for the controller's same-file check.

use std::{fmt::Debug, fs::File, path::Path};

use mpv::Format;
use tracing::{debug, warn};

use crate::{
    error::PlaybackError,
    player::{EngineEvent, MediaEngine, PlayerState},
};

pub(crate) struct MpvEngine {
    handler: mpv::MpvHandler,
    observed: Observed,
}

impl MpvEngine {
    /// Creates an audio-only MPV context and subscribes to the properties the
    /// controller needs.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::Engine`] if `libmpv` cannot be initialised.
    pub(crate) fn new() -> Result<Self, PlaybackError> {
        let mut builder =
            mpv::MpvHandlerBuilder::new().map_err(engine_error("create MPV builder"))?;
        builder
            .set_option("vo", "null")
            .map_err(engine_error("set no video output"))?;
        builder
            .set_option("keep-open", "yes")
            .map_err(engine_error("set keep-open"))?;
        let mut handler = builder.build().map_err(engine_error("build MPV handler"))?;

        handler
            .observe_property::<f64>("duration", 0)
            .map_err(engine_error("observe duration"))?;
        handler
            .observe_property::<f64>("time-pos", 0)
            .map_err(engine_error("observe time-pos"))?;
        handler
            .observe_property::<bool>("pause", 0)
            .map_err(engine_error("observe pause"))?;
        handler
            .observe_property::<bool>("idle-active", 0)
            .map_err(engine_error("observe idle-active"))?;
        handler
            .observe_property::<bool>("eof-reached", 0)
            .map_err(engine_error("observe eof-reached"))?;

        Ok(Self {
            handler,
            observed: Observed::default(),
        })
    }
}

impl MediaEngine for MpvEngine {
    fn load(&mut self, path: &Path) -> Result<(), PlaybackError> {
        // MPV reports unreadable files asynchronously; catch the common cases
        // up front so the caller sees them immediately.
        File::open(path).map_err(|e| PlaybackError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let filename = path.to_str().ok_or_else(|| PlaybackError::Open {
            path: path.to_path_buf(),
            reason: "path is not valid UTF-8".to_string(),
        })?;

        self.handler
            .command(&["loadfile", filename, "replace"])
            .map_err(|e| PlaybackError::Open {
                path: path.to_path_buf(),
                reason: format!("{e:?}"),
            })?;

        self.observed.file_loaded();
        debug!(filename, "file loaded");
        Ok(())
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        self.handler
            .set_property("pause", false)
            .map_err(engine_error("resume"))
    }

    fn pause(&mut self) -> Result<(), PlaybackError> {
        self.handler
            .set_property("pause", true)
            .map_err(engine_error("pause"))
    }

    fn stop(&mut self) -> Result<(), PlaybackError> {
        self.pause()?;
        if self.observed.has_file() {
            self.seek(0)?;
        }
        self.observed.position_ms = 0;
        Ok(())
    }

    fn seek(&mut self, position_ms: u64) -> Result<(), PlaybackError> {
        let seconds = format!("{:.3}", position_ms as f64 / 1000.0);
        self.handler
            .command(&["seek", &seconds, "absolute"])
            .map_err(engine_error("seek"))?;
        self.observed.position_ms = position_ms;
        Ok(())
    }

    fn set_volume(&mut self, percent: u8) -> Result<(), PlaybackError> {
        self.handler
            .set_property("volume", f64::from(percent))
            .map_err(engine_error("set volume"))
    }

    fn position_ms(&self) -> u64 {
        self.observed.position_ms
    }

    fn duration_ms(&self) -> u64 {
        self.observed.duration_ms
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        let mut events = Vec::new();

        while let Some(mpv_event) = self.handler.wait_event(0.0) {
            let event = match mpv_event {
                mpv::Event::PropertyChange { name, change, .. } => {
                    self.observed.property_changed(name, change)
                }
                mpv::Event::EndFile(Err(e)) => {
                    warn!(error = ?e, "MPV failed to play file");
                    Some(EngineEvent::LoadFailed(format!("{e:?}")))
                }
                _ => None,
            };

            if let Some(state) = self.observed.take_state_change() {
                events.push(EngineEvent::StateChanged(state));
            }

            if let Some(event) = event {
                events.push(event);
            }
        }

        events
    }
}

/// The MPV properties mirrored between polls.
#[derive(Debug)]
struct Observed {
    is_paused: bool,
    is_idle: bool,
    state: PlayerState,
    position_ms: u64,
    duration_ms: u64,
}

impl Default for Observed {
    fn default() -> Self {
        Self {
            is_paused: false,
            is_idle: true,
            state: PlayerState::Stopped,
            position_ms: 0,
            duration_ms: 0,
        }
    }
}

impl Observed {
    // MPV leaves idle as soon as `loadfile` is accepted, before the
    // idle-active notification is polled.
    fn file_loaded(&mut self) {
        self.is_idle = false;
        self.position_ms = 0;
        self.duration_ms = 0;
    }

    fn has_file(&self) -> bool {
        !self.is_idle
    }

    fn property_changed(&mut self, name: &str, change: Format) -> Option<EngineEvent> {
        match (name, change) {
            ("duration", Format::Double(seconds)) if seconds >= 0.0 => {
                self.duration_ms = to_millis(seconds);
                Some(EngineEvent::DurationChanged(self.duration_ms))
            }
            ("time-pos", Format::Double(seconds)) if seconds >= 0.0 => {
                self.position_ms = to_millis(seconds);
                Some(EngineEvent::PositionChanged(self.position_ms))
            }
            ("pause", Format::Flag(pause)) => {
                self.is_paused = pause;
                None
            }
            ("idle-active", Format::Flag(idle_active)) => {
                self.is_idle = idle_active;
                None
            }
            ("eof-reached", Format::Flag(true)) => {
                // time-pos can stop a few milliseconds short of the reported
                // duration.
                self.position_ms = self.position_ms.max(self.duration_ms);
                Some(EngineEvent::EndOfFile)
            }
            _ => None,
        }
    }

    // Returns the new state if the pause and idle flags imply a different one.
    fn take_state_change(&mut self) -> Option<PlayerState> {
        let new_state = player_state(self.is_paused, self.is_idle);
        (new_state != self.state).then(|| {
            self.state = new_state;
            new_state
        })
    }
}

// Maps MPV's pause and idle flags to a simplified [`PlayerState`].
fn player_state(is_paused: bool, is_idle: bool) -> PlayerState {
    if is_idle {
        PlayerState::Stopped
    } else if is_paused {
        PlayerState::Paused
    } else {
        PlayerState::Playing
    }
}

fn to_millis(seconds: f64) -> u64 {
    (seconds * 1000.0).round() as u64
}

fn engine_error<E: Debug>(action: &'static str) -> impl Fn(E) -> PlaybackError {
    move |e| PlaybackError::Engine(format!("Failed to {action}: {e:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_file_counts_as_loaded_before_idle_is_reported() {
        let mut observed = Observed::default();
        assert!(!observed.has_file());

        observed.file_loaded();

        assert!(observed.has_file());
    }

    #[test]
    fn going_idle_drops_the_file() {
        let mut observed = Observed::default();
        observed.file_loaded();

        observed.property_changed("idle-active", Format::Flag(true));

        assert!(!observed.has_file());
    }

    #[test]
    fn end_of_file_catches_position_up_to_duration() {
        let mut observed = Observed::default();
        observed.file_loaded();
        observed.property_changed("duration", Format::Double(180.0));
        observed.property_changed("time-pos", Format::Double(179.98));

        let event = observed.property_changed("eof-reached", Format::Flag(true));

        assert_eq!(event, Some(EngineEvent::EndOfFile));
        assert_eq!(observed.position_ms, 180_000);
    }

    #[test]
    fn state_changes_are_reported_once() {
        let mut observed = Observed::default();
        observed.file_loaded();

        assert_eq!(observed.take_state_change(), Some(PlayerState::Playing));
        assert_eq!(observed.take_state_change(), None);

        observed.property_changed("pause", Format::Flag(true));
        assert_eq!(observed.take_state_change(), Some(PlayerState::Paused));
    }
}
