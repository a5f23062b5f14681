//! Splash screen: full-frame landing page shown before the library view.
//!
//! Not part of the focus ring; the App routes input here while the session is
//! in `ViewMode::Splash`.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::Action;
use crate::theme::{C_ACCENT, C_ACCENT_DEEP, C_BG, C_PRIMARY, C_SECONDARY};

const TITLE: &str = "R H Y T H M O T U N E";
const TAGLINE: &str = "Experience seamless music enjoyment, crafted for every moment.";
const BUTTON: &str = "  Start Explore →  ";

#[derive(Default)]
pub struct Splash {
    /// Where the button was last drawn, for click hit-testing.
    button: Rect,
}

impl Splash {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => vec![Action::EnterMain],
            _ => vec![],
        }
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        let hit = event.column >= self.button.x
            && event.column < self.button.x + self.button.width
            && event.row >= self.button.y
            && event.row < self.button.y + self.button.height;
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) if hit => vec![Action::EnterMain],
            _ => vec![],
        }
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Paragraph::new("").style(Style::default().bg(C_BG)), area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(1), // ♪ mark
                Constraint::Length(2),
                Constraint::Length(1), // title
                Constraint::Length(1),
                Constraint::Length(1), // tagline
                Constraint::Length(2),
                Constraint::Length(1), // button
                Constraint::Fill(1),
            ])
            .split(area);

        let centered = |text: Line<'static>| Paragraph::new(text).alignment(Alignment::Center);

        frame.render_widget(
            centered(Line::from(Span::styled("♪ ♫ ♪", Style::default().fg(C_ACCENT)))),
            rows[1],
        );
        frame.render_widget(
            centered(Line::from(Span::styled(
                TITLE,
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            ))),
            rows[3],
        );
        frame.render_widget(
            centered(Line::from(Span::styled(TAGLINE, Style::default().fg(C_SECONDARY)))),
            rows[5],
        );

        let w = (BUTTON.chars().count() as u16).min(rows[7].width);
        self.button = Rect {
            x: rows[7].x + (rows[7].width.saturating_sub(w)) / 2,
            y: rows[7].y,
            width: w,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                BUTTON,
                Style::default()
                    .fg(C_BG)
                    .bg(C_ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
            self.button,
        );
        frame.render_widget(
            centered(Line::from(Span::styled(
                "press Enter",
                Style::default().fg(C_ACCENT_DEEP),
            ))),
            Rect {
                y: self.button.y + 1,
                height: 1,
                ..rows[8]
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    #[test]
    fn enter_and_space_start_exploring() {
        let mut s = Splash::new();
        for code in [KeyCode::Enter, KeyCode::Char(' ')] {
            assert_eq!(
                s.handle_key(KeyEvent::new(code, KeyModifiers::NONE)),
                vec![Action::EnterMain]
            );
        }
        assert!(s
            .handle_key(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE))
            .is_empty());
    }

    #[test]
    fn click_outside_button_is_ignored() {
        let mut s = Splash::new();
        s.button = Rect::new(10, 5, 20, 1);
        let click = |column, row| MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };
        assert!(s.handle_mouse(click(2, 5)).is_empty());
        assert_eq!(s.handle_mouse(click(15, 5)), vec![Action::EnterMain]);
    }
}
