//! # TUI Adapter
//!
//! The ratatui-specific rendering layer. Handles terminal I/O, renders the
//! selection and the aggregated timetable, and translates keyboard events into
//! `core::Action` values dispatched through the [`Runtime`].
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Loading** (catalog or timetable fetch in flight): redraws every ~80ms so
//!   the loading markers stay current.
//! - **Idle**: sleeps up to 250ms and only redraws on input or when a
//!   completion arrives from a background fetch.

mod component;
mod components;
mod event;
mod ui;

use std::io::stdout;
use std::time::Duration;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use log::info;

use crate::core::action::{Action, Effect};
use crate::core::state::App;
use crate::runtime::Runtime;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ChosenEvent, ChosenListState, InputEvent, ModuleInputState, TimetableViewState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Chosen,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Input => Focus::Chosen,
            Focus::Chosen => Focus::Input,
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub server: String,
    pub focus: Focus,
    pub module_input: ModuleInputState,
    pub chosen_list: ChosenListState,
    pub timetable_view: TimetableViewState,
}

impl TuiState {
    pub fn new(server: String) -> Self {
        Self {
            server,
            focus: Focus::Input, // User expects to type immediately
            module_input: ModuleInputState::new(),
            chosen_list: ChosenListState::new(),
            timetable_view: TimetableViewState::new(),
        }
    }

    /// Pulls the props components cache out of core state.
    pub fn sync(&mut self, app: &App) {
        self.module_input.sync(&app.catalog);
        self.chosen_list.sync(app.selection.list());
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Routes one terminal event. Returns the effect of any dispatched action.
fn handle_tui_event(runtime: &mut Runtime, tui: &mut TuiState, event: TuiEvent) -> Effect {
    match event {
        TuiEvent::Resize => Effect::None,
        TuiEvent::ForceQuit => runtime.dispatch(Action::Quit),
        TuiEvent::ReloadCatalog => runtime.dispatch(Action::LoadCatalog),
        TuiEvent::Escape if runtime.app().error.is_some() => {
            runtime.dispatch(Action::DismissError)
        }
        TuiEvent::Escape if tui.focus == Focus::Chosen => {
            tui.focus = Focus::Input;
            Effect::None
        }
        TuiEvent::Escape => runtime.dispatch(Action::Quit),
        TuiEvent::FocusNext => {
            tui.focus = tui.focus.next();
            Effect::None
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.timetable_view.handle_event(&event);
            Effect::None
        }
        // Typing in the chosen list jumps back to the input
        TuiEvent::InputChar(_) | TuiEvent::Paste(_) if tui.focus == Focus::Chosen => {
            tui.focus = Focus::Input;
            handle_tui_event(runtime, tui, event)
        }
        _ => match tui.focus {
            Focus::Input => match tui.module_input.handle_event(&event) {
                Some(InputEvent::Submit(display_name)) => {
                    let effect = runtime.dispatch(Action::AddModule(display_name.clone()));
                    if runtime.app().selection.contains(&display_name) {
                        tui.module_input.clear();
                    }
                    effect
                }
                None => Effect::None,
            },
            Focus::Chosen => match tui.chosen_list.handle_event(&event) {
                Some(ChosenEvent::Remove(display_name)) => {
                    runtime.dispatch(Action::RemoveModule(display_name))
                }
                None => Effect::None,
            },
        },
    }
}

/// Runs the interactive session until the user quits.
///
/// Must be called from within a tokio runtime: fetches are spawned onto it.
pub fn run(mut runtime: Runtime, server: String) -> std::io::Result<()> {
    let mut tui = TuiState::new(server);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    runtime.dispatch(Action::LoadCatalog);
    let mut needs_redraw = true; // Force first frame

    loop {
        // Apply completions from background fetches
        if runtime.drain() > 0 {
            needs_redraw = true;
        }
        let loading = runtime.app().is_loading();
        if loading {
            needs_redraw = true;
        }

        if needs_redraw {
            tui.sync(runtime.app());
            terminal.draw(|f| ui::draw_ui(f, runtime.app(), &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if loading {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain all pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            tui.sync(runtime.app());
            if handle_tui_event(&mut runtime, &mut tui, event) == Effect::Quit {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            info!("Quit requested");
            break;
        }
    }

    ratatui::restore();
    Ok(())
}
