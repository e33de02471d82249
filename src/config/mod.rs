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

//! Application configuration and persisted preferences.
//!
//! This module manages two `confy` files: the application configuration,
//! which is only read, and the user preferences, which are rewritten on every
//! volume change.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

const CONFIG_NAME: &str = "tunedeck";
const PREFERENCES_NAME: &str = "preferences";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub version: u32,
    /// Playlist database file, relative to the working directory unless
    /// absolute.
    pub database_file: String,
    pub log_file: String,
    /// Step used by the relative seek keys.
    pub seek_step_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            database_file: "playlist.db".to_string(),
            log_file: "tunedeck.log".to_string(),
            seek_step_ms: 5_000,
        }
    }
}

/// Loads the application configuration, writing the defaults on first run.
///
/// # Errors
///
/// Returns an error if the configuration file cannot be located, read or
/// parsed. Logging may not be set up yet, so the caller reports it.
pub fn load_config() -> Result<AppConfig, confy::ConfyError> {
    let path = confy::get_configuration_file_path(CONFIG_NAME, None)?;
    load_config_from(&path)
}

fn load_config_from(path: &Path) -> Result<AppConfig, confy::ConfyError> {
    confy::load_path(path)
}

/// User interface state restored at start-up.
///
/// The volume gauge is the only slider, so `slider_position` is always saved
/// equal to `volume`. On load `volume` is the one applied.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub volume: i32,
    pub slider_position: i32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            volume: 50,
            slider_position: 0,
        }
    }
}

/// Somewhere to persist [`Preferences`].
pub(crate) trait PreferenceStore {
    fn load(&self) -> Preferences;

    fn save(&mut self, preferences: &Preferences) -> Result<(), confy::ConfyError>;
}

/// Preferences kept alongside the application configuration.
pub(crate) struct ConfyPreferences;

impl PreferenceStore for ConfyPreferences {
    fn load(&self) -> Preferences {
        confy::load(CONFIG_NAME, Some(PREFERENCES_NAME)).unwrap_or_else(|e| {
            warn!(error = %e, "unreadable preferences, using defaults");
            Preferences::default()
        })
    }

    fn save(&mut self, preferences: &Preferences) -> Result<(), confy::ConfyError> {
        confy::store(CONFIG_NAME, Some(PREFERENCES_NAME), preferences)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    /// In-memory preferences whose saved values stay observable through a
    /// shared handle.
    #[derive(Clone, Default)]
    pub(crate) struct MemoryPreferences {
        pub(crate) saved: Rc<RefCell<Option<Preferences>>>,
    }

    impl PreferenceStore for MemoryPreferences {
        fn load(&self) -> Preferences {
            self.saved.borrow().unwrap_or_default()
        }

        fn save(&mut self, preferences: &Preferences) -> Result<(), confy::ConfyError> {
            *self.saved.borrow_mut() = Some(*preferences);
            Ok(())
        }
    }
}
