//! SearchBar: "ask the DJ" input plus the recommendation panel under it.
//!
//! Enter hands the raw text to the session core; blank filtering happens
//! there.  While a request is outstanding the trailing glyph spins.  The
//! result panel stays until dismissed with `x` or Esc.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_ACCENT, C_MUTED, C_PRIMARY},
    widgets::{
        pane_chrome::pane_chrome,
        search_input::{SearchAction, SearchInput},
        toast::SPINNER_FRAMES,
    },
};

const PLACEHOLDER: &str = "Search for a song or ask AI for a mood...";

pub struct SearchBar {
    input: SearchInput,
    frame: usize,
}

impl SearchBar {
    pub fn new() -> Self {
        Self {
            input: SearchInput::new(PLACEHOLDER),
            frame: 0,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.input.is_active()
    }

    /// Rows needed: bordered input, plus the result panel when present.
    pub fn desired_height(state: &AppState) -> u16 {
        match state.session.query.last_result {
            Some(ref text) => 3 + 2 + (text.lines().count() as u16).min(8),
            None => 3,
        }
    }
}

impl Default for SearchBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SearchBar {
    fn id(&self) -> ComponentId {
        ComponentId::SearchBar
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }

        if self.input.is_active() {
            return match self.input.handle_key(key) {
                SearchAction::Submitted(text) => {
                    vec![Action::SubmitQuery(text), Action::CloseSearch]
                }
                SearchAction::Cancelled => vec![Action::CloseSearch],
                SearchAction::Edited => vec![],
            };
        }

        let has_result = state.session.query.last_result.is_some();
        match key.code {
            KeyCode::Char('/') | KeyCode::Enter | KeyCode::Char('i') => vec![Action::OpenSearch],
            KeyCode::Char('x') | KeyCode::Esc if has_result => vec![Action::DismissResult],
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return vec![];
        }
        // Row 1 is the input line; the result panel's header carries [x].
        if event.row == area.y + 1 {
            return vec![Action::FocusPane(ComponentId::SearchBar), Action::OpenSearch];
        }
        if event.row == area.y + 3 && state.session.query.last_result.is_some() {
            return vec![Action::DismissResult];
        }
        vec![Action::FocusPane(ComponentId::SearchBar)]
    }

    fn tick(&mut self, state: &AppState) -> Vec<Action> {
        if state.session.query.is_loading {
            self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::OpenSearch => self.input.activate(),
            Action::CloseSearch
            | Action::FocusNext
            | Action::FocusPrev
            | Action::FocusPane(_) => self.input.deactivate(),
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let query = &state.session.query;
        let badge = query
            .is_loading
            .then(|| format!("asking: {}", query.query_text));
        let input_area = Rect {
            height: area.height.min(3),
            ..area
        };
        let block = pane_chrome("ask the DJ", Some('1'), focused, badge);
        let inner = block.inner(input_area);
        frame.render_widget(block, input_area);

        let spinner = query.is_loading.then(|| SPINNER_FRAMES[self.frame]);
        self.input.draw(frame, inner, spinner);

        let Some(ref result) = query.last_result else {
            return;
        };
        if area.height <= 3 {
            return;
        }
        let panel = Rect {
            y: area.y + 3,
            height: area.height - 3,
            ..area
        };
        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    " ✦ AI DJ Recommendations",
                    Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
                ),
                Span::styled("   [x] close", Style::default().fg(C_MUTED)),
            ]),
            Line::from(""),
        ];
        lines.extend(result.lines().map(|l| {
            Line::from(Span::styled(format!("  {}", l), Style::default().fg(C_PRIMARY)))
        }));
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), panel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;
    use tune_proto::catalog::Catalog;
    use tune_proto::protocol::{SessionState, ViewMode};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state() -> AppState {
        AppState::new(SessionState::new(Catalog::seed(), ViewMode::Main).unwrap())
    }

    #[test]
    fn slash_opens_then_enter_submits() {
        let mut bar = SearchBar::new();
        let st = state();
        assert_eq!(bar.handle_key(key(KeyCode::Char('/')), &st), vec![Action::OpenSearch]);
        bar.on_action(&Action::OpenSearch, &st);
        assert!(bar.is_editing());

        for c in "rainy day".chars() {
            bar.handle_key(key(KeyCode::Char(c)), &st);
        }
        assert_eq!(
            bar.handle_key(key(KeyCode::Enter), &st),
            vec![Action::SubmitQuery("rainy day".to_string()), Action::CloseSearch]
        );
    }

    #[test]
    fn x_dismisses_only_when_a_result_is_shown() {
        let mut bar = SearchBar::new();
        let mut st = state();
        assert!(bar.handle_key(key(KeyCode::Char('x')), &st).is_empty());

        st.session.query.last_result = Some("1. Song — Artist".to_string());
        assert_eq!(
            bar.handle_key(key(KeyCode::Char('x')), &st),
            vec![Action::DismissResult]
        );
        assert_eq!(SearchBar::desired_height(&st), 6);
    }
}
