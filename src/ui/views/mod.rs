//! Per-command render functions.
//!
//! Views turn use-case results into strings; commands decide where they go.
//! Nothing here prints directly, which keeps rendering testable.

pub mod build;
pub mod check;
pub mod clean;
pub mod diff;
pub mod images;
pub mod inspect;
pub mod push;
pub mod run;
