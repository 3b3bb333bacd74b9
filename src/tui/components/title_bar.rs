//! # TitleBar Component
//!
//! Top status bar showing the backend, the current status and the last error.
//!
//! TitleBar is purely presentational: it receives all data as props and has
//! no internal state.
//!
//! ## Conditional Formatting
//!
//! 1. **Error**: `"Timetabler (server: …) | Timetable refresh failed | <error>"`, error in red
//! 2. **Loading**: a `⟳` marker follows the status message
//! 3. **Default**: `"Timetabler (server: …) | <status>"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// Backend base URL
    pub server: String,
    /// Status message (e.g. "Added ACCT0001")
    pub status_message: String,
    /// Last user-facing error, if any
    pub error: Option<String>,
    /// Whether a fetch is outstanding
    pub is_loading: bool,
}

impl TitleBar {
    pub fn new(
        server: String,
        status_message: String,
        error: Option<String>,
        is_loading: bool,
    ) -> Self {
        Self {
            server,
            status_message,
            error,
            is_loading,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            format!("Timetabler (server: {})", self.server),
            Style::default().add_modifier(Modifier::BOLD),
        )];

        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }
        if self.is_loading {
            spans.push(Span::styled(" ⟳", Style::default().fg(Color::Yellow)));
        }
        if let Some(error) = &self.error {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(error.clone(), Style::default().fg(Color::Red)));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
