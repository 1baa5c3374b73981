//! Clean Use Case
//!
//! Removes images from the local store.
//!
//! This module handles:
//! - Previewing which images a clean would remove
//! - Deleting image directories and their index entries

mod options;
mod result;
mod use_case;

pub use options::CleanOptions;
pub use result::CleanResult;
pub use use_case::CleanUseCase;
