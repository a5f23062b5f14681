//! Status bar: bottom line with input mode and keybindings.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tune_proto::protocol::ViewMode;

use crate::theme::{C_MODE_NORMAL, C_MODE_SEARCH, C_MUTED};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Search,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "BROWSE",
            Self::Search => "ASK DJ",
        }
    }

    pub fn color(self) -> ratatui::style::Color {
        match self {
            Self::Normal => C_MODE_NORMAL,
            Self::Search => C_MODE_SEARCH,
        }
    }
}

/// Key hints for the current screen and mode.
pub fn key_hints(mode: InputMode, view: ViewMode) -> &'static str {
    match (view, mode) {
        (ViewMode::Splash, _) => " Enter start exploring  q quit",
        (ViewMode::Main, InputMode::Normal) => {
            " ↑↓/jk move  ←→/hl carousel+pills  Enter play  Space pause  n/p next/prev  e expand  / ask DJ  x close result  Tab/1-6 panes  K keys  q quit"
        }
        (ViewMode::Main, InputMode::Search) => {
            " type a mood  Enter ask  Esc clear+close  Tab next pane"
        }
    }
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode, view: ViewMode) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default().fg(mode.color()).add_modifier(Modifier::BOLD),
        ),
        Span::styled(key_hints(mode, view), Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
