//! Process Launching
//!
//! Spawning image processes and probing their exposed ports.

mod port;
mod process;

pub use port::probe;
pub use process::{exit_code, spawn, LaunchSpec, RunningProcess};
