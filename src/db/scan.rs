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

//! Song import from picked files and folders.
//!
//! Files are imported as given. Folders are expanded to the `mp3` files they
//! contain directly, sorted by file name, using `WalkDir` limited to a single
//! level. Each song is named after its file name without the extension.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{error::StorageError, model::NewSong};

/// The only audio extension picked up from folders.
pub(crate) const AUDIO_EXTENSION: &str = "mp3";

/// Expands picked paths into songs ready for insertion, preserving the order
/// in which the paths were given.
///
/// # Errors
///
/// Returns [`StorageError::Io`] if a path does not exist or a folder cannot be
/// read.
pub(crate) fn collect_songs(paths: &[PathBuf]) -> Result<Vec<NewSong>, StorageError> {
    let mut songs = Vec::new();

    for path in paths {
        let metadata = fs::metadata(path).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;

        if metadata.is_dir() {
            songs.extend(scan_folder(path)?);
        } else if let Some(song) = song_for_file(path)? {
            songs.push(song);
        }
    }

    debug!(count = songs.len(), "songs collected for import");
    Ok(songs)
}

fn scan_folder(folder: &Path) -> Result<Vec<NewSong>, StorageError> {
    let mut songs = Vec::new();

    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| StorageError::Io {
            path: e.path().map_or_else(|| folder.to_path_buf(), Path::to_path_buf),
            source: e.into(),
        })?;

        let path = entry.path();
        let is_audio = entry.file_type().is_file()
            && path.extension().is_some_and(|ext| ext == AUDIO_EXTENSION);

        if is_audio && let Some(song) = song_for_file(path)? {
            songs.push(song);
        }
    }

    Ok(songs)
}

fn song_for_file(path: &Path) -> Result<Option<NewSong>, StorageError> {
    let absolute = std::path::absolute(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let Some(location) = absolute.to_str() else {
        warn!(path = ?absolute, "skipping path that is not valid UTF-8");
        return Ok(None);
    };

    Ok(Some(NewSong::new(song_name(&absolute), location)))
}

/// Derives the default display name of a song: its file name without the
/// extension.
pub(crate) fn song_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
