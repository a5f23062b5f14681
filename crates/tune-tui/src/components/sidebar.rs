//! Sidebar: static navigation column.  Purely decorative; not focusable.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app_state::AppState;
use crate::theme::{play_glyph, C_ACCENT, C_MUTED, C_PRIMARY, C_SECONDARY, C_SEPARATOR};

const NAV: &[&str] = &["Home", "Categories", "Artists"];
const PLAYLISTS: &[&str] = &["Vibes & Chill", "Morning Boost", "Rhythm & Energy"];

pub fn draw_sidebar(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(C_SEPARATOR));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled(
            " ♪ RhythmoTune",
            Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(" MENU", Style::default().fg(C_MUTED))),
    ];
    for (i, item) in NAV.iter().enumerate() {
        // Home is the only real page.
        let style = if i == 0 {
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(C_SECONDARY)
        };
        lines.push(Line::from(Span::styled(format!("   {}", item), style)));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" PLAYLISTS", Style::default().fg(C_MUTED))));
    for item in PLAYLISTS {
        lines.push(Line::from(Span::styled(
            format!("   {}", item),
            Style::default().fg(C_SECONDARY),
        )));
    }

    if let Some(track) = state.current_track() {
        let (glyph, color) = play_glyph(state.is_playing());
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", glyph), Style::default().fg(color)),
            Span::styled(track.title.clone(), Style::default().fg(C_MUTED)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
