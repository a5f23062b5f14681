//! PlayerBar: persistent now-playing strip at the bottom of the main view.
//!
//! Collapsed: glyph, title/artist, transport hints, progress line.
//! Expanded (`e`): adds the active category and the up-next track.
//! The progress position is a fixed placeholder; nothing actually plays.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{play_glyph, C_ACCENT, C_MUTED, C_PRIMARY, C_SECONDARY},
    widgets::{pane_chrome::pane_chrome, progress_bar::draw_progress},
};

const STATIC_PROGRESS: f64 = 0.3;

#[derive(Default)]
pub struct PlayerBar {
    expanded: bool,
    /// Transport controls (prev, toggle, next) from the last draw.
    controls: [Rect; 3],
}

impl PlayerBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn desired_height(&self) -> u16 {
        if self.expanded {
            7
        } else {
            4
        }
    }
}

impl Component for PlayerBar {
    fn id(&self) -> ComponentId {
        ComponentId::PlayerBar
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Enter => vec![Action::TogglePlay],
            KeyCode::Left | KeyCode::Char('h') => vec![Action::Prev],
            KeyCode::Right | KeyCode::Char('l') => vec![Action::Next],
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return vec![];
        }
        let hit = self.controls.iter().position(|r| {
            event.column >= r.x
                && event.column < r.x + r.width
                && event.row >= r.y
                && event.row < r.y + r.height
        });
        match hit {
            Some(0) => vec![Action::Prev],
            Some(1) => vec![Action::TogglePlay],
            Some(2) => vec![Action::Next],
            _ => vec![Action::FocusPane(ComponentId::PlayerBar)],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if *action == Action::ToggleExpandPlayer {
            self.expanded = !self.expanded;
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let badge = Some(if self.expanded { "e collapse" } else { "e expand" }.to_string());
        let block = pane_chrome("now playing", Some('6'), focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 {
            return;
        }

        let (glyph, glyph_color) = play_glyph(state.is_playing());
        let (title, artist, duration) = match state.current_track() {
            Some(t) => (t.title.clone(), t.artist.clone(), t.duration_secs),
            // Pointer left dangling by an unknown id.
            None => ("Unknown track".to_string(), String::new(), 0),
        };

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(13)])
            .split(Rect { height: 1, ..inner });

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!(" {} ", glyph), Style::default().fg(glyph_color)),
                Span::styled(
                    title,
                    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {}", artist), Style::default().fg(C_SECONDARY)),
            ])),
            cols[0],
        );

        let ctl = cols[1];
        self.controls = [
            Rect { x: ctl.x, width: 4, ..ctl },
            Rect { x: ctl.x + 4, width: 5, ..ctl },
            Rect { x: ctl.x + 9, width: 4, ..ctl },
        ];
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" ⏮  ", Style::default().fg(C_SECONDARY)),
                Span::styled(
                    format!(" {}  ", glyph),
                    Style::default().fg(glyph_color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" ⏭  ", Style::default().fg(C_SECONDARY)),
            ])),
            ctl,
        );

        if inner.height > 1 {
            draw_progress(
                frame,
                Rect {
                    y: inner.y + 1,
                    height: 1,
                    x: inner.x + 1,
                    width: inner.width.saturating_sub(2),
                },
                STATIC_PROGRESS,
                duration,
            );
        }

        if !self.expanded || inner.height < 4 {
            return;
        }
        let category = state
            .session
            .active_category()
            .map(|c| c.label.clone())
            .unwrap_or_default();
        let catalog = &state.session.catalog;
        let up_next = catalog
            .position_of(&state.session.selection.current_track_id)
            .and_then(|i| catalog.track_at((i + 1) % catalog.track_count()));
        let mut lines = vec![Line::from(vec![
            Span::styled(" category  ", Style::default().fg(C_MUTED)),
            Span::styled(category, Style::default().fg(C_ACCENT)),
        ])];
        if let Some(next) = up_next {
            lines.push(Line::from(vec![
                Span::styled(" up next   ", Style::default().fg(C_MUTED)),
                Span::styled(next.title.clone(), Style::default().fg(C_PRIMARY)),
                Span::styled(format!("  {}", next.artist), Style::default().fg(C_SECONDARY)),
            ]));
        }
        frame.render_widget(
            Paragraph::new(lines),
            Rect {
                y: inner.y + 3,
                height: inner.height - 3,
                ..inner
            },
        );
    }
}
