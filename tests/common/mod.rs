//! Common test utilities for homework-notifier integration tests

#[allow(dead_code)]
pub mod fixtures;

pub use fixtures::*;
