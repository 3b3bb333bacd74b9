//! # ChosenList Component
//!
//! The user's chosen modules, in the order they were added. When focused,
//! Up/Down move the selection and Delete/Backspace removes the selected
//! module. Removal is emitted by value (the display string), never by row.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::catalog::CatalogEntry;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChosenEvent {
    Remove(String),
}

#[derive(Debug, Default)]
pub struct ChosenListState {
    /// Mirror of the selection, refreshed by `sync`.
    pub entries: Vec<String>,
    pub list_state: ListState,
}

impl ChosenListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refreshes the entries and keeps the cursor on a valid row.
    pub fn sync(&mut self, chosen: &[String]) {
        if self.entries != chosen {
            self.entries = chosen.to_vec();
        }
        let selected = match (self.list_state.selected(), self.entries.len()) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(i), len) => Some(i.min(len - 1)),
        };
        self.list_state.select(selected);
    }

    pub fn selected_entry(&self) -> Option<&String> {
        self.list_state.selected().and_then(|i| self.entries.get(i))
    }
}

impl EventHandler for ChosenListState {
    type Event = ChosenEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorUp => {
                self.list_state.select_previous();
                None
            }
            TuiEvent::CursorDown => {
                if let Some(i) = self.list_state.selected()
                    && i + 1 < self.entries.len()
                {
                    self.list_state.select(Some(i + 1));
                }
                None
            }
            TuiEvent::Delete | TuiEvent::Backspace => {
                self.selected_entry().cloned().map(ChosenEvent::Remove)
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the chosen list.
pub struct ChosenList<'a> {
    state: &'a mut ChosenListState,
    focused: bool,
}

impl<'a> ChosenList<'a> {
    pub fn new(state: &'a mut ChosenListState, focused: bool) -> Self {
        Self { state, focused }
    }
}

impl Component for ChosenList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let help = if self.focused {
            " ↑↓ Select  Del Remove  Tab Input "
        } else {
            " Tab to edit "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if self.focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            })
            .title(format!(" Chosen ({}) ", self.state.entries.len()))
            .title_bottom(Line::from(help).centered())
            .padding(Padding::horizontal(1));

        if self.state.entries.is_empty() {
            let empty = Paragraph::new("No modules chosen yet.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let inner_width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .state
            .entries
            .iter()
            .map(|display_name| {
                let entry = CatalogEntry::parse(display_name);
                let code = format!("{:<9}", entry.code);
                let title_width = inner_width.saturating_sub(code.width());
                ListItem::new(Line::from(vec![
                    Span::styled(code, Style::default().fg(Color::Yellow)),
                    Span::raw(truncate_to_width(entry.title, title_width)),
                ]))
            })
            .collect();

        let highlight = if self.focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let list = List::new(items).block(block).highlight_style(highlight);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// Truncate to `max_width` display columns, adding "..." if needed.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    for c in s.chars() {
        if out.width() + c.to_string().width() > max_width - 3 {
            break;
        }
        out.push(c);
    }
    out.push_str("...");
    out
}
