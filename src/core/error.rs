//! User-facing error taxonomy.
//!
//! None of these are fatal: each one ends the operation that raised it and is
//! reported through `App::error`. The selection store stays usable afterwards.

use thiserror::Error;

/// `add` was called with a value that is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("\"{display_name}\" is not in the module catalog; please select a module from the list provided")]
pub struct ValidationError {
    pub display_name: String,
}

/// Catalog retrieval failed or returned unparsable data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not load the module catalog: {0}")]
pub struct CatalogFetchError(pub String);

/// Timetable retrieval failed or returned unparsable data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not load timetables: {0}")]
pub struct TimetableFetchError(pub String);
