//! Domain Services
//!
//! Pure business logic services that operate on domain entities.
//! These services have no I/O dependencies and are easily testable.

pub mod differ;
pub mod preflight;
pub mod resolver;

pub use differ::{DiffLine, DiffTag, Differ, LineDiff};
pub use preflight::{is_secret_shaped, CheckFinding, Severity};
