//! Build Options
//!
//! Configuration types for build operations.

use std::path::PathBuf;

/// Options for the build use case
///
/// Paths here are already resolved: the command layer applies the
/// flag > environment > file > default hierarchy before building.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// The build definition file (for events and error messages)
    pub file: PathBuf,
    /// Project root; manifest, base layout and entry point resolve against it
    pub project_root: PathBuf,
    /// Image store root
    pub store: PathBuf,
    /// Package repository root
    pub repository: PathBuf,
    /// Tag override (`--tag`), wins over the definition's tag
    pub tag_override: Option<String>,
    /// Install deadline override (`--timeout-secs`)
    pub timeout_secs: Option<u64>,
    /// Resolve and report without staging or promoting anything
    pub dry_run: bool,
}

impl BuildOptions {
    pub fn new(
        file: impl Into<PathBuf>,
        store: impl Into<PathBuf>,
        repository: impl Into<PathBuf>,
    ) -> Self {
        let file: PathBuf = file.into();
        let project_root = file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            file,
            project_root,
            store: store.into(),
            repository: repository.into(),
            tag_override: None,
            timeout_secs: None,
            dry_run: false,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag_override = Some(tag.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
