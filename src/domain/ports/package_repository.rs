//! PackageRepository port - abstraction over the package source
//!
//! The build use case resolves and installs packages through this trait
//! without knowing where they come from. The shipped implementation is a
//! local directory tree; tests substitute failing or slow repositories.

use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;

use crate::domain::value_objects::Version;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Errors raised by a package repository
#[derive(Error, Debug)]
pub enum RepoError {
    /// Package has no presence in the repository at all
    #[error("unknown package '{name}'")]
    UnknownPackage { name: String },

    /// The phase deadline elapsed while handling this package
    #[error("deadline exceeded while installing '{package}'")]
    DeadlineExceeded { package: String },

    /// Repository root is missing or unreadable
    #[error("repository unavailable at {path}")]
    Unavailable { path: PathBuf },

    /// Underlying IO failure while copying package payloads
    #[error("install failed for '{package}': {source}")]
    Io {
        package: String,
        #[source]
        source: std::io::Error,
    },
}

/// Where a package's payload lands inside a stage
#[derive(Debug, Clone)]
pub struct InstallTarget {
    /// Receives the package's `lib/` tree, merged with earlier packages
    pub lib_dir: PathBuf,
    /// Receives the package's `bin/` entries
    pub bin_dir: PathBuf,
}

impl InstallTarget {
    /// Conventional layout under a stage root: `<root>/lib` and `<root>/bin`
    pub fn under(stage_root: &Path) -> Self {
        Self {
            lib_dir: stage_root.join("lib"),
            bin_dir: stage_root.join("bin"),
        }
    }
}

/// One installed package, as reported back to the build
#[derive(Debug, Clone)]
pub struct InstalledPackage {
    pub name: String,
    pub version: Version,
    /// Stage-relative paths written (`lib/...`, `bin/...`)
    pub files: Vec<String>,
    /// Stage-relative paths that already existed and were replaced
    pub overwrites: Vec<String>,
}

/// Abstract package source
pub trait PackageRepository {
    /// Versions available for `name`, unsorted
    ///
    /// Returns `UnknownPackage` when the repository has never heard of it.
    fn available_versions(&self, name: &str) -> RepoResult<Vec<Version>>;

    /// Copy one package version into the target, honoring the deadline
    ///
    /// The deadline bounds the whole install phase; implementations check it
    /// between payload copies and abort with `DeadlineExceeded` once crossed.
    fn install(
        &self,
        name: &str,
        version: &Version,
        target: &InstallTarget,
        deadline: Option<Instant>,
    ) -> RepoResult<InstalledPackage>;

    /// Human-readable location for headers and errors
    fn describe(&self) -> String;
}
