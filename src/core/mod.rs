//! # Core Application Logic
//!
//! Module selection and timetable aggregation. It knows nothing about HTTP or
//! terminals.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │  Runtime   │ ── fetch ──▶ service ──▶ │  Action    │
//!     │  (tokio)   │ ◀────────────────────────│  channel   │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: selectable modules and code derivation
//! - [`selection`]: the chosen-module set
//! - [`guard`]: request tokens and the staleness check
//! - [`timetable`]: the aggregated timetable
//! - [`state`]: the `App` struct, all core state in one place
//! - [`action`]: the `Action` enum and `update()`
//! - [`config`]: settings file, env and CLI resolution
//! - [`error`]: user-facing errors

pub mod action;
pub mod catalog;
pub mod config;
pub mod error;
pub mod guard;
pub mod selection;
pub mod state;
pub mod timetable;
