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

//! Playlist list widget state.
//!
//! The highlighted row is purely visual; moving it does not change the
//! playback cursor until the row is activated.

mod render;

use ratatui::widgets::ListState;

pub(crate) struct PlaylistView {
    pub(crate) list_state: ListState,
}

impl PlaylistView {
    pub(crate) fn new() -> Self {
        Self {
            list_state: ListState::default(),
        }
    }

    pub(crate) fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    pub(crate) fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    pub(crate) fn previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    /// Keeps the highlight on a row that exists after the playlist changed.
    pub(crate) fn sync(&mut self, len: usize) {
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            None => self.list_state.select(Some(0)),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_wraps_at_both_ends() {
        let mut view = PlaylistView::new();

        view.previous(3);
        assert_eq!(view.selected(), Some(2));
        view.next(3);
        assert_eq!(view.selected(), Some(0));
    }

    #[test]
    fn sync_follows_playlist_length() {
        let mut view = PlaylistView::new();
        view.sync(2);
        assert_eq!(view.selected(), Some(0));

        view.next(2);
        view.sync(1);
        assert_eq!(view.selected(), Some(0));

        view.sync(0);
        assert_eq!(view.selected(), None);
    }
}
