//! # Selection Store
//!
//! The ordered, deduplicated set of modules the user has chosen.
//!
//! Entries are validated display strings. Because they are unique, the display
//! string itself is the stable identity of an entry: removal is by value, never
//! by position in whatever list the UI happens to be showing.
//!
//! ```text
//!            add (valid, new)
//!   Empty ─────────────────────▶ NonEmpty ──┐ add / remove
//!     ▲                             │   ◀───┘ (still non-empty)
//!     └─────── remove (last) ───────┘
//! ```

use crate::core::catalog::{Catalog, module_code};
use crate::core::error::ValidationError;

/// Result of a successful `add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyChosen,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStore {
    chosen: Vec<String>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `display_name` if it is in `catalog` and not already chosen.
    ///
    /// On `Err` the store is untouched.
    pub fn add(
        &mut self,
        display_name: &str,
        catalog: &Catalog,
    ) -> Result<AddOutcome, ValidationError> {
        if !catalog.contains(display_name) {
            return Err(ValidationError {
                display_name: display_name.to_string(),
            });
        }
        if self.contains(display_name) {
            return Ok(AddOutcome::AlreadyChosen);
        }
        self.chosen.push(display_name.to_string());
        Ok(AddOutcome::Added)
    }

    /// Removes `display_name` if present. Returns whether anything changed.
    pub fn remove(&mut self, display_name: &str) -> bool {
        let before = self.chosen.len();
        self.chosen.retain(|entry| entry != display_name);
        self.chosen.len() != before
    }

    pub fn list(&self) -> &[String] {
        &self.chosen
    }

    pub fn contains(&self, display_name: &str) -> bool {
        self.chosen.iter().any(|entry| entry == display_name)
    }

    pub fn is_empty(&self) -> bool {
        self.chosen.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chosen.len()
    }

    /// Module codes for the current selection, in selection order.
    pub fn codes(&self) -> Vec<String> {
        self.chosen
            .iter()
            .map(|entry| module_code(entry).to_string())
            .collect()
    }
}
