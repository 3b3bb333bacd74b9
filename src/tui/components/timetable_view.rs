//! # TimetableView Component
//!
//! Scrollable view of the aggregated timetable, one section per chosen module
//! in selection order.
//!
//! Records are opaque to the core. For display, a record that looks like the
//! backend's activity listing (a list of activities, or an object of weekday →
//! list of activities) is rendered one line per activity, sorted by weekday and
//! start time. Anything else is shown as compact JSON.

use chrono::{NaiveTime, Weekday};
use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use serde::Deserialize;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::catalog::{CatalogEntry, module_code};
use crate::core::timetable::{AggregatedTimetable, TimetableRecord};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// One teaching activity as the backend lists it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Activity {
    #[serde(rename = "Day Of The Week", default)]
    pub day: Option<String>,
    #[serde(rename = "Activity", default)]
    pub activity: String,
    #[serde(rename = "Start")]
    pub start: String,
    #[serde(rename = "End")]
    pub end: String,
    #[serde(rename = "Room", default)]
    pub room: String,
}

impl Activity {
    fn weekday(&self) -> Option<Weekday> {
        self.day.as_deref().and_then(|d| d.parse::<Weekday>().ok())
    }

    fn sort_key(&self) -> (u32, Option<NaiveTime>) {
        (
            self.weekday().map_or(7, |d| d.num_days_from_monday()),
            parse_time(&self.start),
        )
    }
}

/// Accepts `"09:00:00"` and `"9:00"`.
fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

fn format_time(raw: &str) -> String {
    parse_time(raw).map_or_else(|| raw.to_string(), |t| t.format("%H:%M").to_string())
}

/// Reads a record as a sorted activity list, if it has that shape.
pub fn activities(record: &TimetableRecord) -> Option<Vec<Activity>> {
    let mut activities: Vec<Activity> = match record.as_value() {
        serde_json::Value::Array(items) => items
            .iter()
            .map(|item| Activity::deserialize(item).ok())
            .collect::<Option<_>>()?,
        serde_json::Value::Object(by_day) => {
            let mut all = Vec::new();
            for (day, items) in by_day {
                let serde_json::Value::Array(items) = items else {
                    return None;
                };
                for item in items {
                    let mut activity = Activity::deserialize(item).ok()?;
                    activity.day.get_or_insert_with(|| day.clone());
                    all.push(activity);
                }
            }
            all
        }
        _ => return None,
    };
    activities.sort_by_key(Activity::sort_key);
    Some(activities)
}

/// Builds every line of the view.
pub fn timetable_lines(
    chosen: &[String],
    timetable: &AggregatedTimetable,
    refreshing: bool,
) -> Vec<Line<'static>> {
    if chosen.is_empty() {
        return vec![Line::styled(
            "Choose modules to see their timetable.",
            Style::default().fg(Color::DarkGray),
        )];
    }

    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::new();
    for display_name in chosen {
        let entry = CatalogEntry::parse(display_name);
        lines.push(Line::from(vec![
            Span::styled(
                entry.code.to_string(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  {}", entry.title)),
        ]));

        match timetable.get(module_code(display_name)) {
            None if refreshing => lines.push(Line::styled("  loading…", dim)),
            None => lines.push(Line::styled("  no timetable", dim)),
            Some(record) => match activities(record) {
                Some(list) if list.is_empty() => {
                    lines.push(Line::styled("  no scheduled activities", dim));
                }
                Some(list) => {
                    for activity in list {
                        let day = activity
                            .weekday()
                            .map_or_else(|| "   ".to_string(), |d| d.to_string());
                        lines.push(Line::from(vec![
                            Span::styled(format!("  {day} "), Style::default().fg(Color::Cyan)),
                            Span::raw(format!(
                                "{}–{}  ",
                                format_time(&activity.start),
                                format_time(&activity.end)
                            )),
                            Span::raw(activity.activity),
                            Span::styled(format!("  {}", activity.room), dim),
                        ]));
                    }
                }
                None => lines.push(Line::raw(format!("  {}", record.as_value()))),
            },
        }
        lines.push(Line::raw(""));
    }
    lines
}

#[derive(Default)]
pub struct TimetableViewState {
    pub scroll_state: ScrollViewState,
}

impl TimetableViewState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventHandler for TimetableViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => {}
        }
        None
    }
}

/// Transient render wrapper for the timetable pane.
pub struct TimetableView<'a> {
    state: &'a mut TimetableViewState,
    chosen: &'a [String],
    timetable: &'a AggregatedTimetable,
    refreshing: bool,
}

impl<'a> TimetableView<'a> {
    pub fn new(
        state: &'a mut TimetableViewState,
        chosen: &'a [String],
        timetable: &'a AggregatedTimetable,
        refreshing: bool,
    ) -> Self {
        Self {
            state,
            chosen,
            timetable,
            refreshing,
        }
    }
}

impl Component for TimetableView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = if self.refreshing {
            " Timetable (refreshing…) "
        } else {
            " Timetable "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title)
            .title_bottom(Line::from(" PgUp/PgDn Scroll ").centered());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = timetable_lines(self.chosen, self.timetable, self.refreshing);
        let content_width = inner.width.saturating_sub(1); // scrollbar
        let total_height = lines.len() as u16;

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(
            Paragraph::new(lines),
            Rect::new(0, 0, content_width, total_height),
        );
        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}
