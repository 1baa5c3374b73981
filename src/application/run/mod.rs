//! Run Module
//!
//! Foreground launch and smoke probing of stored images.
//!
//! ## Structure
//!
//! - `options` - Configuration types (`RunOptions`, `SmokeOptions`)
//! - `result` - Result types (`RunOutcome`, `SmokeReport`)
//! - `use_case` - Core use case logic (`RunUseCase`)

mod options;
mod result;
mod use_case;

pub use options::{parse_env_assignments, RunOptions, SmokeOptions};
pub use result::{RunOutcome, SmokeOutcome, SmokeReport};
pub use use_case::RunUseCase;

#[cfg(test)]
mod tests;
