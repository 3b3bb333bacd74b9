//! # Staleness Guard
//!
//! Timetable fetches are independent requests and may complete in any order.
//! Every fetch is stamped with a [`RequestToken`] when it is issued; a response
//! may only touch shared state if its token is still the latest one issued.
//! Later-issued wins, not later-completed.

use std::fmt;

use log::debug;

use crate::core::timetable::{AggregatedTimetable, Aggregator};

/// Monotonically increasing sequence number assigned when a fetch is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What happened to a response handed to the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    Applied,
    /// The response belongs to a superseded selection and was dropped.
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct StalenessGuard {
    latest_issued: Option<RequestToken>,
}

impl StalenessGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a token strictly greater than every token issued before.
    pub fn issue(&mut self) -> RequestToken {
        let next = RequestToken(self.latest_issued.map_or(1, |t| t.0 + 1));
        self.latest_issued = Some(next);
        next
    }

    /// Invalidates every outstanding token without issuing a request.
    ///
    /// Used when the selection becomes empty: the aggregate is cleared locally
    /// and nothing still in flight may repopulate it.
    pub fn supersede(&mut self) {
        self.issue();
    }

    pub fn latest_issued(&self) -> Option<RequestToken> {
        self.latest_issued
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest_issued == Some(token)
    }

    /// Applies `response` to `aggregator` only if `token` is the latest issued.
    pub fn accept(
        &self,
        token: RequestToken,
        response: AggregatedTimetable,
        aggregator: &mut Aggregator,
    ) -> Acceptance {
        if self.is_current(token) {
            aggregator.replace(response);
            Acceptance::Applied
        } else {
            debug!(
                "Discarding stale timetable response {} (latest issued {:?})",
                token, self.latest_issued
            );
            Acceptance::Stale
        }
    }
}
