//! # ModuleInput Component
//!
//! Text input for picking a module, with catalog suggestions above it.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ModuleInputState` lives in `TuiState` (buffer, suggestions, highlight)
//! - `ModuleInput` is created each frame with borrowed state and props
//!
//! Suggestions are a case-insensitive substring match over the catalog,
//! refreshed through [`ModuleInputState::sync`] before events are handled.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::catalog::Catalog;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub const MAX_SUGGESTIONS: usize = 8;
const INPUT_HEIGHT: u16 = 3;

/// High-level events emitted by the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// User asked to add this display string.
    Submit(String),
}

#[derive(Debug, Default)]
pub struct ModuleInputState {
    pub buffer: String,
    pub suggestions: Vec<String>,
    pub highlighted: usize,
}

impl ModuleInputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes suggestions for the current buffer.
    pub fn sync(&mut self, catalog: &Catalog) {
        self.suggestions = if self.buffer.trim().is_empty() {
            Vec::new()
        } else {
            catalog
                .search(&self.buffer, MAX_SUGGESTIONS)
                .into_iter()
                .map(str::to_string)
                .collect()
        };
        self.highlighted = self
            .highlighted
            .min(self.suggestions.len().saturating_sub(1));
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.suggestions.clear();
        self.highlighted = 0;
    }

    /// Rows needed by the input plus its suggestion list.
    pub fn height(&self) -> u16 {
        if self.suggestions.is_empty() {
            INPUT_HEIGHT
        } else {
            INPUT_HEIGHT + self.suggestions.len() as u16 + 2
        }
    }

    /// An exact match wins, then the highlighted suggestion, then the raw text.
    fn submission(&self) -> Option<String> {
        let typed = self.buffer.trim();
        if typed.is_empty() {
            return None;
        }
        if let Some(exact) = self.suggestions.iter().find(|s| s.as_str() == typed) {
            return Some(exact.clone());
        }
        Some(
            self.suggestions
                .get(self.highlighted)
                .cloned()
                .unwrap_or_else(|| typed.to_string()),
        )
    }
}

impl EventHandler for ModuleInputState {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.push(*c);
                self.highlighted = 0;
                None
            }
            TuiEvent::Paste(text) => {
                // Single-line input
                self.buffer.push_str(text.lines().next().unwrap_or(""));
                self.highlighted = 0;
                None
            }
            TuiEvent::Backspace => {
                self.buffer.pop();
                self.highlighted = 0;
                None
            }
            TuiEvent::CursorUp => {
                self.highlighted = self.highlighted.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                if !self.suggestions.is_empty() {
                    self.highlighted = (self.highlighted + 1).min(self.suggestions.len() - 1);
                }
                None
            }
            TuiEvent::Submit => self.submission().map(InputEvent::Submit),
            _ => None,
        }
    }
}

/// Transient render wrapper for the module input.
pub struct ModuleInput<'a> {
    state: &'a ModuleInputState,
    focused: bool,
    catalog_ready: bool,
}

impl<'a> ModuleInput<'a> {
    pub fn new(state: &'a ModuleInputState, focused: bool, catalog_ready: bool) -> Self {
        Self {
            state,
            focused,
            catalog_ready,
        }
    }
}

impl Component for ModuleInput<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [suggestion_area, input_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(INPUT_HEIGHT)]).areas(area);

        if !self.state.suggestions.is_empty() && suggestion_area.height > 0 {
            let items: Vec<ListItem> = self
                .state
                .suggestions
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    let style = if i == self.state.highlighted {
                        Style::default().add_modifier(Modifier::REVERSED)
                    } else {
                        Style::default().fg(Color::Gray)
                    };
                    ListItem::new(Line::styled(entry.clone(), style))
                })
                .collect();
            let list = List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(" Matches "),
            );
            frame.render_widget(list, suggestion_area);
        }

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let title = if self.catalog_ready {
            " Add module (Enter) "
        } else {
            " Add module (catalog not loaded, Ctrl+R to retry) "
        };
        let input = Paragraph::new(self.state.buffer.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        );
        frame.render_widget(input, input_area);

        if self.focused {
            let typed_width = self.state.buffer.width() as u16;
            let max_x = input_area.x + input_area.width.saturating_sub(2);
            frame.set_cursor_position(Position::new(
                (input_area.x + 1 + typed_width).min(max_x),
                input_area.y + 1,
            ));
        }
    }
}
