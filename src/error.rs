//! Error types for kiln
//!
//! Library errors use `thiserror`; the binary layer wraps them with `anyhow`.
//! Every failure here is terminal for the operation that raised it: builds
//! abort without producing an image, launches exit non-zero.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for kiln operations
pub type KilnResult<T> = Result<T, KilnError>;

/// Main error type for kiln operations
#[derive(Error, Debug)]
pub enum KilnError {
    /// Build definition file is missing
    #[error("no build definition found at {path} - run `kiln init` to create one")]
    ConfigNotFound { path: PathBuf },

    /// Build definition failed to parse or validate
    #[error("invalid build definition in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Image name violates the allowed charset
    #[error("invalid image name '{name}' - use lowercase letters, digits, '.', '_' or '-'")]
    InvalidImageName { name: String },

    /// Image tag violates the allowed charset
    #[error("invalid image tag '{tag}' - use lowercase letters, digits, '.', '_' or '-'")]
    InvalidImageTag { tag: String },

    /// Image reference could not be parsed as `name[:tag]`
    #[error("invalid image reference '{input}' - expected name[:tag]")]
    InvalidImageRef { input: String },

    /// Malformed line in the dependency manifest
    #[error("invalid requirement in {file}:{line}: {message}")]
    ManifestSyntax {
        file: PathBuf,
        line: usize,
        message: String,
    },

    /// Dependency manifest file is missing
    #[error("dependency manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// Package repository directory is missing
    #[error("package repository not found: {path}")]
    RepositoryNotFound { path: PathBuf },

    /// Package has no versions in the repository
    #[error("unknown package '{name}' - not present in the repository")]
    UnknownPackage { name: String },

    /// Package exists but no version satisfies the constraint
    #[error("no version of '{name}' satisfies '{constraint}' (available: {available})")]
    NoMatchingVersion {
        name: String,
        constraint: String,
        available: String,
    },

    /// Installation deadline elapsed mid-phase
    #[error("install timed out after {secs}s while fetching '{package}'")]
    InstallTimeout { package: String, secs: u64 },

    /// Base layout directory configured but absent
    #[error("base layout not found: {path}")]
    BaseLayoutMissing { path: PathBuf },

    /// Entry-point file absent at copy time
    #[error("entry point not found: {path}")]
    EntryPointMissing { path: PathBuf },

    /// Path escapes project boundary (security issue)
    #[error("path '{path}' escapes project boundary '{root}'")]
    PathEscape { path: PathBuf, root: PathBuf },

    /// `.kilnignore` file is oversized or has a bad pattern
    #[error("invalid ignore file {file}: {message}")]
    IgnoreFile { file: PathBuf, message: String },

    /// Image reference not present in the store
    #[error("image '{reference}' not found in the store")]
    ImageNotFound { reference: String },

    /// Store index or image manifest is unreadable
    #[error("store corrupted at {path}: {message}")]
    StoreCorrupted { path: PathBuf, message: String },

    /// Image manifest was written by an incompatible kiln
    #[error("unsupported image manifest version {found} (supported: {supported}) - rebuild with `kiln build`")]
    UnsupportedManifestVersion { found: u32, supported: u32 },

    /// Child process could not be spawned
    #[error("failed to launch '{program}': {message}")]
    LaunchFailed { program: String, message: String },

    /// Exposed port never accepted within the startup window
    #[error("port {port} did not accept a connection within {secs}s")]
    PortWaitTimeout { port: u16, secs: u64 },

    /// `--env` value was not KEY=VALUE
    #[error("invalid environment assignment '{input}' - expected KEY=VALUE")]
    InvalidEnvAssignment { input: String },

    /// Remote transfer tool failed or none is installed
    #[error("transfer failed: {message}")]
    TransferFailed { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
