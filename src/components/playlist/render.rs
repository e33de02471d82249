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

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
};

use crate::{
    components::PlaylistView, model::playlist::Playlist, render::icons::ICON_PLAY, theme::Theme,
};

impl PlaylistView {
    pub(crate) fn draw(&mut self, f: &mut Frame, area: Rect, playlist: &Playlist, theme: &Theme) {
        let block = Block::default()
            .title(format!(" Playlist | {} songs ", playlist.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_colour))
            .padding(Padding::horizontal(1));

        if playlist.is_empty() {
            let hint = Paragraph::new("No songs yet. Type :add <file or folder> to import some.")
                .fg(theme.muted_colour)
                .block(block);
            f.render_widget(hint, area);
            return;
        }

        let cursor = playlist.cursor();

        let items: Vec<ListItem> = playlist
            .entries()
            .iter()
            .enumerate()
            .map(|(row, entry)| {
                if Some(row) == cursor {
                    ListItem::new(Line::from(vec![
                        Span::raw(format!("{ICON_PLAY} ")),
                        Span::styled(entry.label(), Style::default().add_modifier(Modifier::BOLD)),
                    ]))
                    .fg(theme.accent_colour)
                } else {
                    ListItem::new(Line::from(format!("  {}", entry.label()))).fg(theme.text_colour)
                }
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(theme.highlight_colour));

        f.render_stateful_widget(list, area, &mut self.list_state);
    }
}
