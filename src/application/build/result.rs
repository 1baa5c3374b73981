//! Build Result
//!
//! Result types for build operations.

use std::path::PathBuf;

use crate::domain::ports::InstalledPackage;
use crate::domain::value_objects::Digest;

/// Result of a successful (or dry-run) build
#[derive(Debug, Clone)]
pub struct BuildResult {
    /// `name:tag` that was built
    pub reference: String,
    /// Image digest; `None` for dry runs
    pub digest: Option<Digest>,
    /// Manifest dependencies installed into the builder stage
    pub installed: Vec<InstalledPackage>,
    /// System packages installed into the runtime stage
    pub system_installed: Vec<InstalledPackage>,
    /// Files in the assembled rootfs
    pub file_count: usize,
    /// Non-fatal observations (package overwrites, odd env defaults)
    pub warnings: Vec<String>,
    pub duration_ms: u64,
    pub dry_run: bool,
    /// Final image directory; `None` for dry runs
    pub image_dir: Option<PathBuf>,
}

impl BuildResult {
    pub fn package_count(&self) -> usize {
        self.installed.len() + self.system_installed.len()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
