//! Push Use Case
//!
//! Copies a built image directory to a remote host. The transfer itself is
//! delegated to whichever tool the system has (rsync preferred, scp as the
//! fallback); this layer verifies the image exists, parses the destination
//! and times the transfer. One shot, no retry.

use std::path::PathBuf;
use std::time::Instant;

use crate::domain::value_objects::ImageRef;
use crate::error::{KilnError, KilnResult};
use crate::infrastructure::repositories::store;
use crate::infrastructure::transfer::{detect_strategy, TransferOptions, TransferStrategy};

/// Default network timeout for one transfer.
pub const DEFAULT_PUSH_TIMEOUT_SECS: u64 = 60;

/// Options for the push use case
#[derive(Debug, Clone)]
pub struct PushOptions {
    /// Image store to read from
    pub store: PathBuf,
    /// Network timeout handed to the transfer tool
    pub timeout_secs: u64,
    /// Suppress transfer tool output
    pub quiet: bool,
}

impl PushOptions {
    pub fn new(store: PathBuf) -> Self {
        Self {
            store,
            timeout_secs: DEFAULT_PUSH_TIMEOUT_SECS,
            quiet: false,
        }
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

/// A parsed `user@host:/path` destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushDestination {
    /// Everything before the colon, handed to ssh as-is
    pub host: String,
    /// Remote directory the image lands in
    pub path: String,
}

impl PushDestination {
    /// Parse `user@host:/path`. The user part is optional; the colon is not.
    pub fn parse(input: &str) -> KilnResult<Self> {
        let (host, path) = input
            .split_once(':')
            .ok_or_else(|| invalid_destination(input))?;
        if host.is_empty() || path.is_empty() {
            return Err(invalid_destination(input));
        }
        Ok(Self {
            host: host.to_string(),
            path: path.to_string(),
        })
    }
}

fn invalid_destination(input: &str) -> KilnError {
    KilnError::TransferFailed {
        message: format!("invalid destination '{input}' - expected user@host:/path"),
    }
}

/// Result of a completed push
#[derive(Debug, Clone)]
pub struct PushResult {
    /// Image that was pushed (`name:tag`)
    pub reference: String,
    /// Destination the image landed on
    pub destination: PushDestination,
    /// Transfer tool that performed the copy
    pub method: &'static str,
    /// Wall-clock transfer time
    pub duration_ms: u64,
}

/// Push use case - copy a built image to a remote host
#[derive(Debug, Default)]
pub struct PushUseCase;

impl PushUseCase {
    pub fn new() -> Self {
        Self
    }

    /// Push with the best transfer tool the system has.
    ///
    /// Bad destinations and missing images are reported before probing for
    /// tools, so those errors do not depend on what is installed.
    pub fn execute(
        &self,
        image: &ImageRef,
        destination: &str,
        options: &PushOptions,
    ) -> KilnResult<PushResult> {
        self.validate(image, destination, options)?;
        let strategy = detect_strategy().ok_or_else(|| KilnError::TransferFailed {
            message: "no transfer tool found (install rsync or scp)".to_string(),
        })?;
        self.execute_with_strategy(image, destination, options, strategy.as_ref())
    }

    /// Push with a caller-chosen transfer strategy.
    pub fn execute_with_strategy(
        &self,
        image: &ImageRef,
        destination: &str,
        options: &PushOptions,
        strategy: &dyn TransferStrategy,
    ) -> KilnResult<PushResult> {
        let dest = self.validate(image, destination, options)?;
        let image_dir = store::image_dir(&options.store, image);

        let started = Instant::now();
        let transfer_options = TransferOptions {
            timeout_secs: options.timeout_secs,
            quiet: options.quiet,
        };
        strategy.transfer(&image_dir, &dest.host, &dest.path, &transfer_options)?;

        Ok(PushResult {
            reference: image.to_string(),
            destination: dest,
            method: strategy.name(),
            duration_ms: started.elapsed().as_millis() as u64,
        })
    }

    fn validate(
        &self,
        image: &ImageRef,
        destination: &str,
        options: &PushOptions,
    ) -> KilnResult<PushDestination> {
        let dest = PushDestination::parse(destination)?;
        let image_dir = store::image_dir(&options.store, image);
        if !store::manifest_path(&image_dir).is_file() {
            return Err(KilnError::ImageNotFound {
                reference: image.to_string(),
            });
        }
        Ok(dest)
    }
}
