//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - staging, hashing and atomic promotion of image trees
//! - `repositories/` - package repository, store index, image manifests
//! - `launcher/` - image process spawning and port probing
//! - `transfer/` - rsync/scp push strategies

pub mod fs;
pub mod launcher;
pub mod repositories;
pub mod transfer;

// Re-export for convenience
pub use repositories::{DirRepository, TomlIndexRepository};
