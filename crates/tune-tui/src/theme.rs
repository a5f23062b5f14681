//! Color palette and style constants for the RhythmoTune TUI.

use ratatui::style::{Color, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(15, 15, 18);
pub const C_ACCENT: Color = Color::Rgb(45, 212, 191); // teal
pub const C_ACCENT_DEEP: Color = Color::Rgb(15, 118, 110);
pub const C_PLAYING: Color = Color::Rgb(45, 212, 191);
pub const C_PAUSED: Color = Color::Rgb(255, 184, 80);
pub const C_MUTED: Color = Color::Rgb(72, 72, 88);
pub const C_SEPARATOR: Color = Color::Rgb(40, 40, 52);
pub const C_SECONDARY: Color = Color::Rgb(140, 140, 160);
pub const C_PRIMARY: Color = Color::Rgb(235, 235, 240);
pub const C_SELECTION_BG: Color = Color::Rgb(32, 32, 44);
pub const C_PANEL_BORDER: Color = Color::Rgb(40, 40, 52);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(45, 212, 191);
pub const C_NUMBER_HINT: Color = Color::Rgb(90, 90, 115);
pub const C_INPUT_BG: Color = Color::Rgb(30, 30, 36);
pub const C_INPUT_FG: Color = Color::Rgb(235, 235, 240);
pub const C_PILL_BG: Color = Color::Rgb(36, 36, 44);
pub const C_TOAST_INFO: Color = Color::Rgb(80, 160, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(45, 212, 191);
pub const C_TOAST_WARNING: Color = Color::Rgb(255, 184, 80);
pub const C_MODE_NORMAL: Color = Color::Rgb(115, 115, 138);
pub const C_MODE_SEARCH: Color = Color::Rgb(45, 212, 191);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

/// Glyph + color for the now-playing marker.
pub fn play_glyph(is_playing: bool) -> (&'static str, Color) {
    if is_playing {
        ("▶", C_PLAYING)
    } else {
        ("⏸", C_PAUSED)
    }
}
