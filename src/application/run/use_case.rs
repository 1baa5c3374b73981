//! Run Use Case
//!
//! Launches a built image's fixed startup command inside its rootfs and
//! stays in the foreground until the service exits or the caller interrupts.
//! The smoke variant launches the same way, then watches the exposed port
//! until it accepts a connection or the startup window closes.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::domain::entities::ImageManifest;
use crate::domain::value_objects::ImageRef;
use crate::error::{KilnError, KilnResult};
use crate::infrastructure::launcher::{self, LaunchSpec};
use crate::infrastructure::repositories::{load_image_manifest, store};

use super::{RunOptions, RunOutcome, SmokeOptions, SmokeOutcome, SmokeReport};

/// Conventional exit code for an interrupted foreground process
const INTERRUPT_EXIT_CODE: i32 = 130;

/// How often the foreground loop checks the child and the interrupt flag
const RUN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How often the smoke loop retries the port
const SMOKE_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Per-attempt connect timeout of the port probe
const PROBE_TIMEOUT: Duration = Duration::from_millis(250);

/// Run use case - foreground launch and smoke probing of stored images
#[derive(Default)]
pub struct RunUseCase;

impl RunUseCase {
    pub fn new() -> Self {
        Self
    }

    /// Launch the image and wait for it to finish.
    ///
    /// The child inherits the terminal. `running` is the interrupt flag: when
    /// it flips to false the child is terminated and the outcome reports the
    /// conventional interrupt code instead of the child's.
    ///
    /// With `wait_port` set, the loop also probes the exposed port until it
    /// accepts, calling `on_ready` once with the port and observed latency.
    /// If the startup window elapses first the child is terminated and the
    /// run fails with `PortWaitTimeout`.
    pub fn run<F>(
        &self,
        image: &ImageRef,
        options: &RunOptions,
        running: Arc<AtomicBool>,
        mut on_ready: F,
    ) -> KilnResult<RunOutcome>
    where
        F: FnMut(u16, u64),
    {
        let (manifest, rootfs) = load_for_launch(&options.store, image)?;
        let port = manifest.exposed_port;
        let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));
        let spec = launch_spec(&manifest, rootfs, &options.env);

        let started = Instant::now();
        let wait_deadline = started + Duration::from_secs(options.wait_timeout_secs);
        let mut waiting = options.wait_port;
        let mut port_ready_ms = None;

        let mut child = launcher::spawn(&spec)?;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(RunOutcome {
                    exit_code: launcher::exit_code(status),
                    interrupted: false,
                    port_ready_ms,
                });
            }
            if !running.load(Ordering::SeqCst) {
                child.terminate()?;
                return Ok(RunOutcome {
                    exit_code: INTERRUPT_EXIT_CODE,
                    interrupted: true,
                    port_ready_ms,
                });
            }
            if waiting {
                if launcher::probe(addr, PROBE_TIMEOUT) {
                    let elapsed = started.elapsed().as_millis() as u64;
                    port_ready_ms = Some(elapsed);
                    on_ready(port, elapsed);
                    waiting = false;
                } else if Instant::now() >= wait_deadline {
                    child.terminate()?;
                    return Err(KilnError::PortWaitTimeout {
                        port,
                        secs: options.wait_timeout_secs,
                    });
                }
            }
            thread::sleep(RUN_POLL_INTERVAL);
        }
    }

    /// Launch the image and wait for its exposed port to accept.
    ///
    /// The child is terminated before returning in every case; a smoke run
    /// never leaves the service behind.
    pub fn smoke(&self, image: &ImageRef, options: &SmokeOptions) -> KilnResult<SmokeReport> {
        let (manifest, rootfs) = load_for_launch(&options.store, image)?;
        let port = options.port_override.unwrap_or(manifest.exposed_port);
        let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));
        let spec = launch_spec(&manifest, rootfs, &options.env);

        let started = Instant::now();
        let deadline = started + Duration::from_secs(options.timeout_secs);
        let mut child = launcher::spawn(&spec)?;

        let outcome = loop {
            if let Some(status) = child.try_wait()? {
                break SmokeOutcome::ProcessExited {
                    exit_code: launcher::exit_code(status),
                };
            }
            if launcher::probe(addr, PROBE_TIMEOUT) {
                break SmokeOutcome::Ready {
                    elapsed_ms: started.elapsed().as_millis() as u64,
                };
            }
            if Instant::now() >= deadline {
                break SmokeOutcome::TimedOut {
                    secs: options.timeout_secs,
                };
            }
            thread::sleep(SMOKE_POLL_INTERVAL);
        };

        child.terminate()?;
        Ok(SmokeReport {
            reference: image.to_string(),
            port,
            outcome,
        })
    }
}

/// Load an image's manifest and locate its rootfs, with store sanity checks.
fn load_for_launch(store_root: &Path, image: &ImageRef) -> KilnResult<(ImageManifest, PathBuf)> {
    let image_dir = store::image_dir(store_root, image);
    if !store::manifest_path(&image_dir).is_file() {
        return Err(KilnError::ImageNotFound {
            reference: image.to_string(),
        });
    }
    let manifest = load_image_manifest(&image_dir)?;
    let rootfs = store::rootfs_dir(&image_dir);
    if !rootfs.is_dir() {
        return Err(KilnError::StoreCorrupted {
            path: image_dir,
            message: "missing rootfs directory".to_string(),
        });
    }
    Ok((manifest, rootfs))
}

fn launch_spec(
    manifest: &ImageManifest,
    rootfs: PathBuf,
    overrides: &[(String, String)],
) -> LaunchSpec {
    LaunchSpec {
        program: manifest.command.program.clone(),
        args: manifest.command.args.clone(),
        rootfs,
        env: manifest.composed_env(overrides),
    }
}
