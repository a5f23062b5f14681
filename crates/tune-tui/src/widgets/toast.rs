//! Toast notifications: transient status lines plus one persistent spinner.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::theme::{C_TOAST_INFO, C_TOAST_SUCCESS, C_TOAST_WARNING};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Info,
    Success,
    Warning,
}

struct Toast {
    message: String,
    severity: Severity,
    expires: Instant,
}

pub const SPINNER_FRAMES: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub struct ToastManager {
    toasts: VecDeque<Toast>,
    spinner: Option<String>,
    frame: usize,
    max_visible: usize,
}

impl ToastManager {
    pub fn new() -> Self {
        Self {
            toasts: VecDeque::new(),
            spinner: None,
            frame: 0,
            max_visible: 3,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, severity: Severity, duration: Duration) {
        let msg = message.into();
        self.toasts.retain(|t| t.message != msg);
        self.toasts.push_back(Toast {
            message: msg,
            severity,
            expires: Instant::now() + duration,
        });
        while self.toasts.len() > self.max_visible * 2 {
            self.toasts.pop_front();
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Info, Duration::from_secs(3));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Success, Duration::from_secs(3));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Warning, Duration::from_secs(4));
    }

    /// Start (or retitle) the persistent spinner.  Stays until dismissed.
    pub fn spinner(&mut self, message: impl Into<String>) {
        self.spinner = Some(message.into());
    }

    pub fn dismiss_spinner(&mut self) {
        self.spinner = None;
    }

    /// Current spinner glyph, shared with widgets that animate in step.
    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.frame % SPINNER_FRAMES.len()]
    }

    /// Remove expired toasts and advance the spinner. Call each tick.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.toasts.retain(|t| t.expires > now);
        self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty() && self.spinner.is_none()
    }

    /// Render toasts in the top-right corner of `area`, spinner first.
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        if self.is_empty() {
            return;
        }
        let max_width = (area.width / 2).clamp(20, 60);
        let bottom = area.y + area.height;
        let mut y = area.y + 1;

        let mut rows: Vec<(String, ratatui::style::Color)> = Vec::new();
        if let Some(ref msg) = self.spinner {
            rows.push((format!(" {} {} ", self.spinner_frame(), msg), C_TOAST_INFO));
        }
        for toast in self.toasts.iter().rev().take(self.max_visible) {
            let (icon, color) = match toast.severity {
                Severity::Info => ("·", C_TOAST_INFO),
                Severity::Success => ("✓", C_TOAST_SUCCESS),
                Severity::Warning => ("!", C_TOAST_WARNING),
            };
            rows.push((format!(" {} {} ", icon, toast.message), color));
        }

        for (text, color) in rows {
            if y >= bottom {
                break;
            }
            let w = (text.chars().count() as u16).min(max_width).min(area.width);
            let toast_area = Rect {
                x: area.x + area.width.saturating_sub(w + 1),
                y,
                width: w,
                height: 1,
            };
            frame.render_widget(Clear, toast_area);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    text,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ))),
                toast_area,
            );
            y += 1;
        }
    }
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}
