//! CategoryPills: one-row strip of category chips.
//!
//! The highlight is display state only; it does not filter the song lists.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_ACCENT, C_BG, C_PILL_BG, C_SECONDARY},
    widgets::pane_chrome::pane_chrome,
};

#[derive(Default)]
pub struct CategoryPills {
    /// (start column, end column, category id) from the last draw.
    hits: Vec<(u16, u16, String)>,
}

impl CategoryPills {
    pub fn new() -> Self {
        Self::default()
    }

    /// Category id one step away from the active one, wrapping.
    fn neighbour(state: &AppState, forward: bool) -> Option<String> {
        let cats = state.session.catalog.categories();
        if cats.is_empty() {
            return None;
        }
        let len = cats.len();
        let current = cats
            .iter()
            .position(|c| c.id == state.session.selection.active_category_id)
            .unwrap_or(0);
        let idx = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        Some(cats[idx].id.clone())
    }
}

impl Component for CategoryPills {
    fn id(&self) -> ComponentId {
        ComponentId::CategoryPills
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let target = match key.code {
            KeyCode::Left | KeyCode::Char('h') => Self::neighbour(state, false),
            KeyCode::Right | KeyCode::Char('l') => Self::neighbour(state, true),
            _ => None,
        };
        target.map(|id| vec![Action::SetCategory(id)]).unwrap_or_default()
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return vec![];
        }
        self.hits
            .iter()
            .find(|(start, end, _)| event.column >= *start && event.column < *end)
            .map(|(_, _, id)| vec![Action::SetCategory(id.clone())])
            .unwrap_or_else(|| vec![Action::FocusPane(ComponentId::CategoryPills)])
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("categories", Some('3'), focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.hits.clear();
        let mut x = inner.x;
        let mut spans = Vec::new();
        for cat in state.session.catalog.categories() {
            let label = format!(" {} ", cat.label);
            let w = label.width() as u16;
            let style = if cat.id == state.session.selection.active_category_id {
                Style::default()
                    .fg(C_BG)
                    .bg(C_ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(C_SECONDARY).bg(C_PILL_BG)
            };
            self.hits.push((x, x + w, cat.id.clone()));
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
            x += w + 1;
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), inner);
    }
}
