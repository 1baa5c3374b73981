//! Common test utilities for kiln CLI integration tests.
//!
//! This module provides:
//! - `TestEnv`: isolated project, store and home directories per test
//! - Assertion macros: `assert_stored!`, `assert_output_contains!`, etc.
//! - Fixtures: reusable definition and manifest constants

pub mod assertions;
pub mod env;
pub mod fixtures;

pub use assertions::*;
pub use env::*;
pub use fixtures::*;
