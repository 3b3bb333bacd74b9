//! # Actions
//!
//! Everything that can happen in Timetabler becomes an `Action`.
//! User picks a module? That's `Action::AddModule(name)`.
//! Backend answers? That's `Action::TimetablesLoaded { token, timetable }`.
//!
//! The `update()` function applies an action to the state and returns the
//! `Effect` the outside world should perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! The timetable is refreshed exactly once per change in the *value* of the
//! selection: adding a module that is already chosen, or removing one that is
//! not, produces no effect.

use log::{debug, info, warn};

use crate::core::catalog::{Catalog, module_code};
use crate::core::error::{CatalogFetchError, TimetableFetchError};
use crate::core::guard::{Acceptance, RequestToken};
use crate::core::selection::AddOutcome;
use crate::core::state::{App, CatalogStatus};
use crate::core::timetable::AggregatedTimetable;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Session start or manual reload of the catalog.
    LoadCatalog,
    CatalogLoaded(Vec<String>),
    CatalogFailed(CatalogFetchError),
    AddModule(String),
    RemoveModule(String),
    TimetablesLoaded {
        token: RequestToken,
        timetable: AggregatedTimetable,
    },
    TimetablesFailed {
        token: RequestToken,
        error: TimetableFetchError,
    },
    DismissError,
    Quit,
}

/// Side effect requested by `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    FetchCatalog,
    /// One batched full-refresh request for every chosen module.
    FetchTimetables {
        token: RequestToken,
        codes: Vec<String>,
    },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::LoadCatalog => {
            if app.catalog_status == CatalogStatus::Loading {
                debug!("Catalog load already pending");
                return Effect::None;
            }
            app.catalog_status = CatalogStatus::Loading;
            app.status_message = String::from("Loading module catalog...");
            Effect::FetchCatalog
        }
        Action::CatalogLoaded(entries) => {
            info!("Catalog loaded: {} modules", entries.len());
            app.catalog = Catalog::new(entries);
            app.catalog_status = CatalogStatus::Ready;
            app.status_message = format!("{} modules available", app.catalog.len());
            app.error = None;
            Effect::None
        }
        Action::CatalogFailed(error) => {
            // Previous catalog (empty on first load) is kept.
            warn!("{}", error);
            app.catalog_status = CatalogStatus::Failed;
            app.status_message = String::from("Catalog unavailable (Ctrl+R to retry)");
            app.error = Some(error.to_string());
            Effect::None
        }
        Action::AddModule(display_name) => {
            match app.selection.add(&display_name, &app.catalog) {
                Ok(AddOutcome::Added) => {
                    app.status_message = format!("Added {}", module_code(&display_name));
                    app.error = None;
                    selection_changed(app)
                }
                Ok(AddOutcome::AlreadyChosen) => {
                    app.status_message =
                        format!("{} is already chosen", module_code(&display_name));
                    Effect::None
                }
                Err(error) => {
                    warn!("Rejected add: {}", error);
                    app.error = Some(error.to_string());
                    Effect::None
                }
            }
        }
        Action::RemoveModule(display_name) => {
            if app.selection.remove(&display_name) {
                app.status_message = format!("Removed {}", module_code(&display_name));
                selection_changed(app)
            } else {
                debug!("Remove of unchosen module ignored: {}", display_name);
                Effect::None
            }
        }
        Action::TimetablesLoaded { token, timetable } => {
            app.in_flight.remove(&token);
            let count = timetable.len();
            match app.guard.accept(token, timetable, &mut app.timetable) {
                Acceptance::Applied => {
                    info!("Applied timetable response {} ({} modules)", token, count);
                    app.status_message = format!("Timetable updated ({} modules)", count);
                }
                Acceptance::Stale => {}
            }
            Effect::None
        }
        Action::TimetablesFailed { token, error } => {
            app.in_flight.remove(&token);
            if app.guard.is_current(token) {
                // Last good aggregate stays on screen.
                warn!("Timetable fetch {} failed: {}", token, error);
                app.status_message = String::from("Timetable refresh failed");
                app.error = Some(error.to_string());
            } else {
                debug!("Ignoring failure of superseded fetch {}: {}", token, error);
            }
            Effect::None
        }
        Action::DismissError => {
            app.error = None;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Runs after every change in the value of the selection.
fn selection_changed(app: &mut App) -> Effect {
    if app.selection.is_empty() {
        app.guard.supersede();
        app.timetable.clear();
        return Effect::None;
    }

    let token = app.guard.issue();
    let codes = app.selection.codes();
    app.in_flight.insert(token);
    debug!("Issuing timetable fetch {} for {:?}", token, codes);
    Effect::FetchTimetables { token, codes }
}
