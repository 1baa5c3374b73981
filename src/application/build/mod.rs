//! Build Module
//!
//! Orchestrates the two-stage image build.
//!
//! ## Structure
//!
//! - `options` - Configuration types (`BuildOptions`)
//! - `result` - Result types (`BuildResult`)
//! - `use_case` - Core use case logic (`BuildUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use kiln::application::build::{BuildOptions, BuildUseCase};
//!
//! let use_case = BuildUseCase::new(packages, index);
//! let result = use_case.execute(&config, &BuildOptions::new(file, store, repo))?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::BuildOptions;
pub use result::BuildResult;
pub use use_case::BuildUseCase;
