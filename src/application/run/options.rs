//! Run Options

use std::path::PathBuf;

use crate::error::{KilnError, KilnResult};

/// Options for launching a built image
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Image store root
    pub store: PathBuf,
    /// Run-time environment overrides, applied on top of image defaults
    pub env: Vec<(String, String)>,
    /// Watch the exposed port and report readiness while the service runs
    pub wait_port: bool,
    /// Startup window for `wait_port`; elapsing it terminates the child
    pub wait_timeout_secs: u64,
}

impl RunOptions {
    pub fn new(store: impl Into<PathBuf>) -> Self {
        Self {
            store: store.into(),
            env: Vec::new(),
            wait_port: false,
            wait_timeout_secs: 30,
        }
    }

    pub fn with_env(mut self, env: Vec<(String, String)>) -> Self {
        self.env = env;
        self
    }

    pub fn with_wait_port(mut self) -> Self {
        self.wait_port = true;
        self
    }

    pub fn with_wait_timeout_secs(mut self, secs: u64) -> Self {
        self.wait_timeout_secs = secs;
        self
    }
}

/// Options for the smoke probe
#[derive(Debug, Clone)]
pub struct SmokeOptions {
    /// Image store root
    pub store: PathBuf,
    /// Run-time environment overrides
    pub env: Vec<(String, String)>,
    /// Startup window the exposed port must accept within
    pub timeout_secs: u64,
    /// Probe this port instead of the image's exposed port
    pub port_override: Option<u16>,
}

impl SmokeOptions {
    pub fn new(store: impl Into<PathBuf>) -> Self {
        Self {
            store: store.into(),
            env: Vec::new(),
            timeout_secs: 30,
            port_override: None,
        }
    }

    pub fn with_env(mut self, env: Vec<(String, String)>) -> Self {
        self.env = env;
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port_override = Some(port);
        self
    }
}

/// Parse `KEY=VALUE` assignments from `--env` flags.
///
/// The value may be empty or contain further `=` characters; the key may not
/// be empty.
pub fn parse_env_assignments(assignments: &[String]) -> KilnResult<Vec<(String, String)>> {
    let mut env = Vec::with_capacity(assignments.len());
    for assignment in assignments {
        match assignment.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                env.push((key.to_string(), value.to_string()));
            }
            _ => {
                return Err(KilnError::InvalidEnvAssignment {
                    input: assignment.clone(),
                })
            }
        }
    }
    Ok(env)
}
