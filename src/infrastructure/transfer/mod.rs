//! Remote Transfer Strategies
//!
//! `kiln push` copies a built image directory to a remote host using
//! whatever transfer tool the system has. Rsync is preferred for its
//! incremental transfers; scp is the fallback.

mod rsync;
mod scp;

use crate::error::KilnResult;
use std::path::Path;

pub use rsync::RsyncTransfer;
pub use scp::ScpTransfer;

/// Knobs shared by every transfer tool.
#[derive(Debug, Clone)]
pub struct TransferOptions {
    /// Network timeout handed to the tool (`--timeout` / `ConnectTimeout`).
    pub timeout_secs: u64,
    /// Suppress tool output (JSON mode owns stdout).
    pub quiet: bool,
}

/// Strategy for copying an image directory to a remote host.
pub trait TransferStrategy: Send + Sync {
    /// Name of this transfer method (for logging).
    fn name(&self) -> &'static str;

    /// Whether the underlying tool is installed.
    fn is_available(&self) -> bool;

    /// Copy the contents of `image_dir` into `remote_host:remote_path`.
    fn transfer(
        &self,
        image_dir: &Path,
        remote_host: &str,
        remote_path: &str,
        options: &TransferOptions,
    ) -> KilnResult<()>;
}

/// Detect and return the best available transfer strategy.
pub fn detect_strategy() -> Option<Box<dyn TransferStrategy>> {
    let rsync = RsyncTransfer;
    if rsync.is_available() {
        return Some(Box::new(rsync));
    }

    let scp = ScpTransfer;
    if scp.is_available() {
        return Some(Box::new(scp));
    }

    None
}
