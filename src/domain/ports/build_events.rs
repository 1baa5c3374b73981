//! Build Event Port
//!
//! Provides an observable interface for build operations.
//! Enables progress reporting, JSON event streams, and debugging.

use std::fmt;
use std::path::PathBuf;

/// Which of the two sequential build stages is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Installs manifest dependencies into a staging tree
    Builder,
    /// Assembles the final rootfs from the builder outputs
    Runtime,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Builder => write!(f, "builder"),
            Stage::Runtime => write!(f, "runtime"),
        }
    }
}

/// Event emitted during build operations
#[derive(Debug, Clone)]
pub enum BuildEvent {
    /// Build started
    Started {
        file: PathBuf,
        reference: String,
        dry_run: bool,
    },

    /// A stage began
    StageStarted { stage: Stage },

    /// A requirement resolved to a concrete version
    PackageResolved { name: String, version: String },

    /// A package's payload landed in the stage
    PackageInstalled {
        stage: Stage,
        name: String,
        version: String,
        files: usize,
    },

    /// Entry-point file copied into the runtime stage
    EntryPointCopied { path: String },

    /// A stage finished
    StageCompleted { stage: Stage, files: usize },

    /// Non-fatal observation (e.g. one package overwrote another's file)
    Warning { message: String },

    /// Image moved into the store and indexed
    Completed {
        reference: String,
        digest: String,
        files: usize,
        duration_ms: u64,
        dry_run: bool,
    },
}

/// Trait for receiving build events
///
/// Implementations can be:
/// - ConsoleEventSink: progress display in terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: silent operation
pub trait BuildEventSink: Send + Sync {
    /// Handle a build event
    fn on_event(&self, event: BuildEvent);

    /// Check if this sink wants detailed events (e.g., per-package)
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl BuildEventSink for NoopEventSink {
    fn on_event(&self, _event: BuildEvent) {
        // Do nothing
    }

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
