//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;
use serde_json::json;

use crate::core::action::{Action, update};
use crate::core::state::App;
use crate::core::timetable::{AggregatedTimetable, TimetableRecord};
use crate::service::{ServiceError, TimetableService};

pub const ACCT: &str = "ACCT0001 - Accounting Placement Bootcamp (L1)";
pub const MATH: &str = "MATH1061 - Linear Algebra I";

/// A service that answers every call immediately from fixed data.
pub struct StaticService {
    fail: bool,
}

impl StaticService {
    pub fn new() -> Self {
        Self { fail: false }
    }

    /// Every call fails with a network error.
    pub fn failing() -> Self {
        Self { fail: true }
    }

    fn check(&self) -> Result<(), ServiceError> {
        if self.fail {
            Err(ServiceError::Network("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TimetableService for StaticService {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_catalog(&self) -> Result<Vec<String>, ServiceError> {
        self.check()?;
        Ok(vec![ACCT.to_string(), MATH.to_string()])
    }

    async fn fetch_timetables(
        &self,
        codes: &[String],
    ) -> Result<AggregatedTimetable, ServiceError> {
        self.check()?;
        Ok(codes
            .iter()
            .map(|code| (code.clone(), TimetableRecord(json!({ "code": code }))))
            .collect())
    }

    async fn validate_credentials(
        &self,
        username: &str,
        _password: &str,
    ) -> Result<bool, ServiceError> {
        self.check()?;
        Ok(username == "abcd12")
    }
}

/// Creates an App whose catalog holds `ACCT` and `MATH`.
pub fn ready_app() -> App {
    let mut app = App::new();
    update(&mut app, Action::LoadCatalog);
    update(
        &mut app,
        Action::CatalogLoaded(vec![ACCT.to_string(), MATH.to_string()]),
    );
    app
}
