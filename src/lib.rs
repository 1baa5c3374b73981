//! Kiln - image builder and runner for Python web services
//!
//! Kiln turns a `kiln.toml` build definition into a self-contained image: a
//! builder stage installs declared packages from a local repository, a runtime
//! stage assembles the root filesystem around an entry point, and the result
//! is promoted atomically into a local store where it can be listed, compared,
//! run, smoke-tested and pushed to remote hosts.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod manifest;

// Re-exports for convenience
pub use application::{BuildOptions, BuildResult, BuildUseCase, RunUseCase};
pub use config::Config;
pub use domain::entities::{ImageManifest, IndexEntry};
pub use domain::value_objects::{ImageRef, Requirement, Version};
pub use error::{KilnError, KilnResult};
pub use manifest::{parse_manifest, parse_manifest_file};
