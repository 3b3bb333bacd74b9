//! # Application State
//!
//! Core business state for Timetabler. Domain logic only; presentation state
//! lives in the `tui` module.
//!
//! ```text
//! App
//! ├── catalog: Catalog                  // selectable display strings
//! ├── catalog_status: CatalogStatus     // idle / loading / ready / failed
//! ├── selection: SelectionStore         // chosen modules, insertion order
//! ├── guard: StalenessGuard             // latest issued request token
//! ├── timetable: Aggregator             // code → record, replaced wholesale
//! ├── in_flight: BTreeSet<RequestToken> // fetches not yet completed
//! ├── status_message: String            // status bar text
//! └── error: Option<String>             // last user-facing error
//! ```
//!
//! State changes only happen through `update(app, action)` in action.rs.

use std::collections::BTreeSet;

use crate::core::catalog::Catalog;
use crate::core::guard::{RequestToken, StalenessGuard};
use crate::core::selection::SelectionStore;
use crate::core::timetable::Aggregator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone)]
pub struct App {
    pub catalog: Catalog,
    pub catalog_status: CatalogStatus,
    pub selection: SelectionStore,
    pub guard: StalenessGuard,
    pub timetable: Aggregator,
    pub in_flight: BTreeSet<RequestToken>,
    pub status_message: String,
    pub error: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            catalog: Catalog::default(),
            catalog_status: CatalogStatus::Idle,
            selection: SelectionStore::new(),
            guard: StalenessGuard::new(),
            timetable: Aggregator::new(),
            in_flight: BTreeSet::new(),
            status_message: String::from("Welcome to Timetabler!"),
            error: None,
        }
    }

    /// True when no timetable fetch is outstanding.
    pub fn is_settled(&self) -> bool {
        self.in_flight.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        !self.is_settled() || self.catalog_status == CatalogStatus::Loading
    }

    /// True while the latest issued fetch has not come back yet.
    pub fn is_refreshing(&self) -> bool {
        self.guard
            .latest_issued()
            .is_some_and(|token| self.in_flight.contains(&token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_new_defaults() {
        let app = App::new();
        assert_eq!(app.status_message, "Welcome to Timetabler!");
        assert_eq!(app.catalog_status, CatalogStatus::Idle);
        assert!(app.selection.is_empty());
        assert!(app.timetable.current().is_empty());
        assert!(app.is_settled());
        assert!(!app.is_loading());
        assert!(!app.is_refreshing());
        assert!(app.error.is_none());
    }

    #[test]
    fn test_loading_while_catalog_fetch_pending() {
        let app = App {
            catalog_status: CatalogStatus::Loading,
            ..App::new()
        };
        assert!(app.is_loading());
        assert!(app.is_settled());
    }
}
