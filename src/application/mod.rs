//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `BuildUseCase` - Orchestrates the two-stage build (resolve, install, assemble, promote)
//! - `RunUseCase` - Launches a built image and supervises the child process
//! - `CheckUseCase` - Validates a build definition without building
//! - `QueryUseCase` - Read-only store views (images, inspect, diff)
//! - `CleanUseCase` - Removes images from the store
//! - `PushUseCase` - Copies a built image to a remote host

pub mod build;
pub mod check;
pub mod clean;
pub mod push;
pub mod query;
pub mod run;

pub use build::{BuildOptions, BuildResult, BuildUseCase};
pub use check::{CheckOptions, CheckReport, CheckUseCase};
pub use clean::{CleanOptions, CleanResult, CleanUseCase};
pub use push::{PushDestination, PushOptions, PushResult, PushUseCase};
pub use query::{ImageDiff, QueryUseCase};
pub use run::{
    parse_env_assignments, RunOptions, RunOutcome, RunUseCase, SmokeOptions, SmokeOutcome,
    SmokeReport,
};
