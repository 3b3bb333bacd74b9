//! # Catalog
//!
//! The full list of modules a user may pick from, as display strings of the
//! form `"<CODE> - <Title> (<Level>)"`. The catalog is loaded once per session
//! and only ever replaced wholesale (initial load or manual reload).

use std::collections::HashSet;

/// Separator between the module code and the rest of a display string.
pub const CODE_SEPARATOR: &str = " - ";

/// Derives the module code from a display string.
///
/// The code is everything before the first `" - "`. A string without the
/// separator is its own code.
///
/// ```
/// use timetabler::core::catalog::module_code;
/// assert_eq!(module_code("MATH1061 - Linear Algebra I"), "MATH1061");
/// assert_eq!(module_code("COMP2181"), "COMP2181");
/// ```
pub fn module_code(display_name: &str) -> &str {
    display_name
        .split_once(CODE_SEPARATOR)
        .map_or(display_name, |(code, _)| code)
}

/// A display string split into its parts, for rendering only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry<'a> {
    pub code: &'a str,
    pub title: &'a str,
    pub level: Option<&'a str>,
}

impl<'a> CatalogEntry<'a> {
    pub fn parse(display_name: &'a str) -> Self {
        let code = module_code(display_name);
        let rest = display_name
            .split_once(CODE_SEPARATOR)
            .map_or("", |(_, rest)| rest);

        // "(L1)" suffix is optional
        let (title, level) = match rest.rfind(" (") {
            Some(open) if rest.ends_with(')') => {
                (&rest[..open], Some(&rest[open + 2..rest.len() - 1]))
            }
            _ => (rest, None),
        };

        Self { code, title, level }
    }
}

/// Ordered catalog of display strings with O(1) membership checks.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<String>,
    index: HashSet<String>,
}

impl Catalog {
    pub fn new(entries: Vec<String>) -> Self {
        let index = entries.iter().cloned().collect();
        Self { entries, index }
    }

    pub fn contains(&self, display_name: &str) -> bool {
        self.index.contains(display_name)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive substring search, in catalog order, capped at `limit`.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&str> {
        let needle = query.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|entry| needle.is_empty() || entry.to_lowercase().contains(&needle))
            .take(limit)
            .map(String::as_str)
            .collect()
    }
}
