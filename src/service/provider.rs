use async_trait::async_trait;
use thiserror::Error;

use crate::core::timetable::AggregatedTimetable;

/// Errors that can occur while talking to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Client misconfigured (unusable base URL, TLS setup).
    #[error("config error: {0}")]
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    #[error("network error: {0}")]
    Network(String),
    /// Backend answered with a non-success status.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },
    /// Body was not the JSON we expected.
    #[error("parse error: {0}")]
    Parse(String),
}

#[async_trait]
pub trait TimetableService: Send + Sync {
    /// Returns the name of the service, for logs.
    fn name(&self) -> &str;

    /// Every selectable module as a `"<code> - <title> (<level>)"` display string.
    async fn fetch_catalog(&self) -> Result<Vec<String>, ServiceError>;

    /// One batched lookup. The returned mapping is keyed by exactly the
    /// submitted codes.
    async fn fetch_timetables(&self, codes: &[String])
    -> Result<AggregatedTimetable, ServiceError>;

    /// Stateless credential check against the login collaborator.
    async fn validate_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, ServiceError>;
}
