//! Smooth Unicode progress bar widget.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tune_proto::catalog::format_duration;

use crate::theme::{C_MUTED, C_PLAYING, C_SECONDARY};

const BLOCKS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

/// Build the bar body: `width` cells, 8 sub-steps per cell.
pub fn bar_string(progress: f64, width: usize) -> String {
    let eighths = (progress.clamp(0.0, 1.0) * width as f64 * 8.0) as usize;
    let full_blocks = eighths / 8;
    let partial = eighths % 8;

    let mut bar = String::with_capacity(width * 3);
    for _ in 0..full_blocks.min(width) {
        bar.push('█');
    }
    if full_blocks < width {
        bar.push(BLOCKS[partial]);
        for _ in (full_blocks + 1)..width {
            bar.push(' ');
        }
    }
    bar
}

/// Render `elapsed ▕bar▏ total` in `area`.  `progress` is 0.0..=1.0.
pub fn draw_progress(frame: &mut Frame, area: Rect, progress: f64, duration_secs: u32) {
    if area.width < 4 || area.height == 0 {
        return;
    }

    let elapsed = (progress.clamp(0.0, 1.0) * duration_secs as f64) as u32;
    let left_label = format_duration(elapsed);
    let right_label = format_duration(duration_secs);
    let label_w = (left_label.len() + right_label.len() + 2) as u16;
    let bar_w = area.width.saturating_sub(label_w).max(4) as usize;

    let line = Line::from(vec![
        Span::styled(format!("{} ", left_label), Style::default().fg(C_SECONDARY)),
        Span::styled(bar_string(progress, bar_w), Style::default().fg(C_PLAYING)),
        Span::styled(format!(" {}", right_label), Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_is_always_width_cells() {
        for p in [0.0, 0.1, 0.3, 0.5, 0.99, 1.0, 2.0, -1.0] {
            assert_eq!(bar_string(p, 20).chars().count(), 20, "progress {}", p);
        }
    }

    #[test]
    fn bar_fill_matches_fraction() {
        let bar = bar_string(0.5, 10);
        assert_eq!(bar.chars().filter(|&c| c == '█').count(), 5);
        assert_eq!(bar_string(1.0, 4), "████");
    }
}
