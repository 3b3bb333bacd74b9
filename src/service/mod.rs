//! # Service Adapters
//!
//! Boundary to the backend data service: the module catalog, batched
//! timetable lookups and the credential check. The core never talks to the
//! network directly; the runtime calls a [`TimetableService`] and posts the
//! outcome back as an `Action`.

pub mod http;
pub mod provider;

pub use http::HttpTimetableService;
pub use provider::{ServiceError, TimetableService};
