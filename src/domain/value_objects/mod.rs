//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts:
//! - `Digest` - sha256 content/image digests
//! - `ImageRef` - `name[:tag]` store keys
//! - `Version` / `Requirement` - dependency manifest values
//! - `IgnorePatterns` - `.kilnignore` matching for tree copies

mod digest;
mod ignore_patterns;
mod image_ref;
mod requirement;
mod version;

pub use digest::Digest;
pub use ignore_patterns::{IgnorePatterns, IGNORE_FILE};
pub use image_ref::{is_valid_name, ImageRef, DEFAULT_TAG};
pub use requirement::{Constraint, Requirement};
pub use version::Version;
