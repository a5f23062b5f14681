//! SearchInput: wraps tui-input for the "ask the DJ" text box.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};
use unicode_width::UnicodeWidthChar;

use crate::theme::{C_ACCENT, C_INPUT_BG, C_INPUT_FG, C_MUTED};

#[derive(Debug, PartialEq)]
pub enum SearchAction {
    Edited,
    Submitted(String),
    Cancelled,
}

pub struct SearchInput {
    input: Input,
    active: bool,
    placeholder: String,
}

impl SearchInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            active: false,
            placeholder: placeholder.into(),
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Esc clears text first and closes on the second press; Enter hands the
    /// raw text back (blank-text filtering is the session's job).
    pub fn handle_key(&mut self, key: KeyEvent) -> SearchAction {
        match key.code {
            KeyCode::Esc => {
                if !self.input.value().is_empty() {
                    self.input = Input::default();
                    SearchAction::Edited
                } else {
                    self.deactivate();
                    SearchAction::Cancelled
                }
            }
            KeyCode::Enter => SearchAction::Submitted(self.input.value().to_string()),
            _ => {
                self.input
                    .handle_event(&ratatui::crossterm::event::Event::Key(key));
                SearchAction::Edited
            }
        }
    }

    /// Render the one-row input; `spinner` replaces the trailing sparkle
    /// while a request is outstanding.
    pub fn draw(&self, frame: &mut Frame, area: Rect, spinner: Option<&str>) {
        let width = area.width.saturating_sub(6) as usize;
        let scroll = self.input.visual_scroll(width);
        let value = self.input.value();
        let body = if value.is_empty() {
            Span::styled(
                format!(" ⌕ {}", self.placeholder),
                Style::default().fg(C_MUTED),
            )
        } else {
            Span::styled(
                format!(" ⌕ {}", skip_columns(value, scroll)),
                Style::default().fg(C_INPUT_FG),
            )
        };
        let tail = Span::styled(
            format!(" {}", spinner.unwrap_or("✦")),
            Style::default().fg(C_ACCENT),
        );

        let paragraph =
            Paragraph::new(Line::from(vec![body, tail])).style(Style::default().bg(C_INPUT_BG));
        frame.render_widget(paragraph, area);

        if self.active {
            let cursor_x = area.x + 3 + self.input.visual_cursor().saturating_sub(scroll) as u16;
            let max_x = area.x + area.width.saturating_sub(1);
            frame.set_cursor_position((cursor_x.min(max_x), area.y));
        }
    }
}

/// Tail of `value` after `cols` display columns.  A wide glyph straddling
/// the cut is dropped whole.
fn skip_columns(value: &str, cols: usize) -> &str {
    let mut skipped = 0;
    for (i, c) in value.char_indices() {
        if skipped >= cols {
            return &value[i..];
        }
        skipped += c.width().unwrap_or(0);
    }
    ""
}
