//! Timetabler library exports for the binary and integration tests

pub mod core;
pub mod runtime;
pub mod service;
pub mod tui;

#[cfg(test)]
pub mod test_support;
