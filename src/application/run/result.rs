//! Run Results

/// How a foreground run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// Exit code to propagate to the caller's shell
    pub exit_code: i32,
    /// True when the run ended on an interrupt instead of process exit
    pub interrupted: bool,
    /// Startup latency observed by `--wait-port`, when it saw the port accept
    pub port_ready_ms: Option<u64>,
}

/// What the smoke probe observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmokeOutcome {
    /// The exposed port accepted a connection within the window
    Ready { elapsed_ms: u64 },
    /// The window elapsed without an accepted connection
    TimedOut { secs: u64 },
    /// The service exited before ever accepting
    ProcessExited { exit_code: i32 },
}

/// Smoke probe report: the outcome plus what was probed
#[derive(Debug, Clone)]
pub struct SmokeReport {
    pub reference: String,
    pub port: u16,
    pub outcome: SmokeOutcome,
}

impl SmokeReport {
    pub fn is_ready(&self) -> bool {
        matches!(self.outcome, SmokeOutcome::Ready { .. })
    }
}
