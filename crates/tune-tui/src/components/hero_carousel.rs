//! HeroCarousel: three framed cards (previous, featured, next) over the
//! carousel window.
//!
//! The window is the head of the catalog (`Catalog::carousel_window`).  Moving
//! the carousel re-points the session's current track, so every other view
//! follows.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use tune_proto::catalog::Track;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{
        play_glyph, style_focused_border, C_ACCENT, C_MUTED, C_PRIMARY, C_SECONDARY, C_SEPARATOR,
    },
    widgets::pane_chrome::pane_chrome,
};

/// Window positions shown for offsets −1, 0, +1 around the featured slot.
///
/// Inside the window the neighbours wrap.  When the current track sits past
/// the window there is no featured card; only the window's last card is kept
/// as the −1 neighbour, and only when it is directly adjacent.  `None` when
/// the window is empty.
pub fn frame_positions(carousel_index: usize, window_len: usize) -> Option<[Option<usize>; 3]> {
    if window_len == 0 {
        return None;
    }
    if carousel_index >= window_len {
        let prev = (carousel_index == window_len).then_some(window_len - 1);
        return Some([prev, None, None]);
    }
    Some([
        Some((carousel_index + window_len - 1) % window_len),
        Some(carousel_index),
        Some((carousel_index + 1) % window_len),
    ])
}

#[derive(Default)]
pub struct HeroCarousel {
    /// Card rects from the last draw, for click hit-testing.
    cards: [Rect; 3],
}

impl HeroCarousel {
    pub fn new() -> Self {
        Self::default()
    }

    fn positions(state: &AppState) -> Option<[Option<usize>; 3]> {
        frame_positions(
            state.carousel_index(),
            state.session.catalog.carousel_window().len(),
        )
    }
}

impl Component for HeroCarousel {
    fn id(&self) -> ComponentId {
        ComponentId::HeroCarousel
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let Some([prev, center, next]) = Self::positions(state) else {
            return vec![];
        };
        let target = match key.code {
            KeyCode::Left | KeyCode::Char('h') => prev.map(Action::SetCarouselIndex),
            KeyCode::Right | KeyCode::Char('l') => next.map(Action::SetCarouselIndex),
            KeyCode::Enter => center
                .and_then(|pos| state.session.catalog.track_at(pos))
                .map(|t| Action::SelectTrack(t.id.clone())),
            _ => None,
        };
        target.into_iter().collect()
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return vec![];
        }
        let Some(positions) = Self::positions(state) else {
            return vec![];
        };
        let hit = self.cards.iter().position(|r| {
            event.column >= r.x
                && event.column < r.x + r.width
                && event.row >= r.y
                && event.row < r.y + r.height
        });
        match hit.map(|slot| (slot, positions[slot])) {
            Some((1, Some(pos))) => state
                .session
                .catalog
                .track_at(pos)
                .map(|t| vec![Action::SelectTrack(t.id.clone())])
                .unwrap_or_default(),
            Some((_, Some(pos))) => vec![Action::SetCarouselIndex(pos)],
            // Empty slot.
            Some((_, None)) => vec![],
            None => vec![Action::FocusPane(ComponentId::HeroCarousel)],
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let window = state.session.catalog.carousel_window();
        let badge = Some(if state.carousel_index() < window.len() {
            format!("{}/{}", state.carousel_index() + 1, window.len())
        } else {
            format!("–/{}", window.len())
        });
        let block = pane_chrome("featured", Some('2'), focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(positions) = Self::positions(state) else {
            return;
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Fill(1), Constraint::Length(1)])
            .split(inner);
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(50),
                Constraint::Percentage(25),
            ])
            .split(rows[0]);

        for (slot, pos) in positions.iter().enumerate() {
            self.cards[slot] = cols[slot];
            if let Some(track) = pos.and_then(|p| window.get(p)) {
                draw_card(frame, cols[slot], track, slot == 1, state);
            }
        }

        // Position dots under the cards.
        let dots: Vec<Span> = (0..window.len())
            .map(|i| {
                if Some(i) == positions[1] {
                    Span::styled("● ", Style::default().fg(C_ACCENT))
                } else {
                    Span::styled("○ ", Style::default().fg(C_MUTED))
                }
            })
            .collect();
        frame.render_widget(
            Paragraph::new(Line::from(dots)).alignment(Alignment::Center),
            rows[1],
        );
    }
}

fn draw_card(frame: &mut Frame, area: Rect, track: &Track, featured: bool, state: &AppState) {
    let border = if featured {
        style_focused_border()
    } else {
        Style::default().fg(C_SEPARATOR)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let title_style = if featured {
        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_SECONDARY)
    };

    let mut lines = Vec::new();
    if inner.height > 3 {
        lines.push(Line::from(""));
    }
    if featured && state.is_current(&track.id) {
        let (glyph, color) = play_glyph(state.is_playing());
        lines.push(Line::from(Span::styled(glyph, Style::default().fg(color))));
    } else {
        lines.push(Line::from(Span::styled("♪", Style::default().fg(C_MUTED))));
    }
    lines.push(Line::from(Span::styled(track.title.clone(), title_style)));
    lines.push(Line::from(Span::styled(
        track.artist.clone(),
        Style::default().fg(C_MUTED),
    )));
    if featured {
        lines.push(Line::from(Span::styled(
            track.duration_label(),
            Style::default().fg(C_SECONDARY),
        )));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;
    use tune_proto::catalog::Catalog;
    use tune_proto::protocol::{SessionState, ViewMode};

    #[test]
    fn positions_wrap_inside_window() {
        assert_eq!(frame_positions(0, 5), Some([Some(4), Some(0), Some(1)]));
        assert_eq!(frame_positions(4, 5), Some([Some(3), Some(4), Some(0)]));
        assert_eq!(frame_positions(0, 1), Some([Some(0), Some(0), Some(0)]));
        assert_eq!(frame_positions(3, 0), None);
    }

    #[test]
    fn positions_past_window_leave_featured_slot_empty() {
        assert_eq!(frame_positions(5, 5), Some([Some(4), None, None]));
        assert_eq!(frame_positions(7, 5), Some([None, None, None]));
    }

    #[test]
    fn current_track_past_window_is_never_replaced() {
        let mut carousel = HeroCarousel::new();
        let mut session = SessionState::new(Catalog::seed(), ViewMode::Main).unwrap();
        let last = session.catalog.tracks().last().unwrap().id.clone();
        session.selection.select_track(&session.catalog, &last);
        assert!(session.selection.carousel_index >= session.catalog.carousel_window().len());
        let st = AppState::new(session);
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);

        let [_, featured, _] = HeroCarousel::positions(&st).unwrap();
        assert_eq!(featured, None);
        assert!(carousel.handle_key(key(KeyCode::Enter), &st).is_empty());
        assert!(carousel.handle_key(key(KeyCode::Right), &st).is_empty());
        assert_eq!(
            carousel.handle_key(key(KeyCode::Left), &st),
            vec![Action::SetCarouselIndex(4)]
        );
    }

    #[test]
    fn arrows_request_neighbouring_index() {
        let mut carousel = HeroCarousel::new();
        let st = AppState::new(SessionState::new(Catalog::seed(), ViewMode::Main).unwrap());
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert_eq!(
            carousel.handle_key(key(KeyCode::Left), &st),
            vec![Action::SetCarouselIndex(4)]
        );
        assert_eq!(
            carousel.handle_key(key(KeyCode::Right), &st),
            vec![Action::SetCarouselIndex(1)]
        );
        assert_eq!(
            carousel.handle_key(key(KeyCode::Enter), &st),
            vec![Action::SelectTrack("1".to_string())]
        );
    }
}
