//! SongList: "Popular songs" and "Recently listened" panes.
//!
//! The cursor is local to each pane.  Enter or a click selects the row's
//! track; the row matching the session's current track carries the
//! play/pause glyph regardless of where the cursor sits.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
    Frame,
};
use tune_proto::catalog::Track;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{play_glyph, C_MUTED, C_NUMBER_HINT, C_PLAYING, C_PRIMARY, C_SECONDARY, C_SELECTION_BG},
    widgets::pane_chrome::pane_chrome,
};

/// Which slice of the catalog a pane lists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SongSource {
    Popular,
    Recent,
}

pub struct SongList {
    source: SongSource,
    cursor: usize,
    list_state: ListState,
}

impl SongList {
    pub fn popular() -> Self {
        Self::new(SongSource::Popular)
    }

    pub fn recent() -> Self {
        Self::new(SongSource::Recent)
    }

    fn new(source: SongSource) -> Self {
        Self {
            source,
            cursor: 0,
            list_state: ListState::default(),
        }
    }

    fn rows<'a>(&self, state: &'a AppState) -> &'a [Track] {
        match self.source {
            SongSource::Popular => state.session.catalog.tracks(),
            SongSource::Recent => state.session.catalog.recent(),
        }
    }

    fn title(&self) -> &'static str {
        match self.source {
            SongSource::Popular => "Popular songs",
            SongSource::Recent => "Recently listened",
        }
    }

    fn number_key(&self) -> char {
        match self.source {
            SongSource::Popular => '4',
            SongSource::Recent => '5',
        }
    }

    fn move_cursor(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let max = len as isize - 1;
        self.cursor = (self.cursor as isize + delta).clamp(0, max) as usize;
    }

    fn select_at_cursor(&self, state: &AppState) -> Vec<Action> {
        self.rows(state)
            .get(self.cursor)
            .map(|t| vec![Action::SelectTrack(t.id.clone())])
            .unwrap_or_default()
    }
}

impl Component for SongList {
    fn id(&self) -> ComponentId {
        match self.source {
            SongSource::Popular => ComponentId::PopularSongs,
            SongSource::Recent => ComponentId::RecentSongs,
        }
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let len = self.rows(state).len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, len),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, len),
            KeyCode::Home | KeyCode::Char('g') => self.cursor = 0,
            KeyCode::End | KeyCode::Char('G') => self.cursor = len.saturating_sub(1),
            KeyCode::Enter => return self.select_at_cursor(state),
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        let len = self.rows(state).len();
        match event.kind {
            MouseEventKind::ScrollUp => self.move_cursor(-1, len),
            MouseEventKind::ScrollDown => self.move_cursor(1, len),
            MouseEventKind::Down(MouseButton::Left) => {
                // +1 for the top border
                let row = event.row.saturating_sub(area.y + 1) as usize + self.list_state.offset();
                if row < len {
                    self.cursor = row;
                    let mut actions = vec![Action::FocusPane(self.id())];
                    actions.extend(self.select_at_cursor(state));
                    return actions;
                }
                return vec![Action::FocusPane(self.id())];
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome(self.title(), Some(self.number_key()), focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = self.rows(state);
        self.cursor = self.cursor.min(rows.len().saturating_sub(1));
        let width = inner.width as usize;

        let items: Vec<ListItem> = rows
            .iter()
            .enumerate()
            .map(|(i, track)| {
                render_row(track, i, width, focused && i == self.cursor, state)
            })
            .collect();

        self.list_state.select(Some(self.cursor));
        frame.render_stateful_widget(
            List::new(items).highlight_symbol(""),
            inner,
            &mut self.list_state,
        );
    }
}

fn render_row(
    track: &Track,
    index: usize,
    width: usize,
    under_cursor: bool,
    state: &AppState,
) -> ListItem<'static> {
    let current = state.is_current(&track.id);
    let marker = if current {
        let (glyph, color) = play_glyph(state.is_playing());
        Span::styled(format!(" {} ", glyph), Style::default().fg(color))
    } else {
        Span::styled(format!("{:>2} ", index + 1), Style::default().fg(C_NUMBER_HINT))
    };

    let duration = track.duration_label();
    // marker(3) + gap(2) + duration
    let text_w = width.saturating_sub(3 + 2 + duration.len());
    let artist_w = (text_w / 3).min(track.artist.width());
    let title_w = text_w.saturating_sub(artist_w + 2);

    let title_style = if current {
        Style::default().fg(C_PLAYING).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_PRIMARY)
    };
    let title = truncate(&track.title, title_w);
    let artist = truncate(&track.artist, artist_w);
    let pad = text_w.saturating_sub(title.width() + artist.width() + 2);

    let line = Line::from(vec![
        marker,
        Span::styled(title, title_style),
        Span::raw("  "),
        Span::styled(artist, Style::default().fg(C_SECONDARY)),
        Span::raw(" ".repeat(pad + 2)),
        Span::styled(duration, Style::default().fg(C_MUTED)),
    ]);

    let item = ListItem::new(line);
    if under_cursor {
        item.style(Style::default().bg(C_SELECTION_BG))
    } else {
        item
    }
}

/// Cut `s` to at most `max` display columns, ending in `…` when shortened.
pub fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
