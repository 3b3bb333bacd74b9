//! # Aggregator
//!
//! Holds the authoritative mapping from module code to timetable record.
//! Every accepted response is a complete snapshot for the selection that
//! produced it, so the mapping is only ever replaced wholesale.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Opaque per-module schedule payload, exactly as the backend sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimetableRecord(pub serde_json::Value);

impl TimetableRecord {
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

pub type AggregatedTimetable = HashMap<String, TimetableRecord>;

#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    current: AggregatedTimetable,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, mapping: AggregatedTimetable) {
        self.current = mapping;
    }

    pub fn clear(&mut self) {
        self.current.clear();
    }

    pub fn current(&self) -> &AggregatedTimetable {
        &self.current
    }

    pub fn get(&self, code: &str) -> Option<&TimetableRecord> {
        self.current.get(code)
    }
}
