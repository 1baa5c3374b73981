//! Command handlers
//!
//! One `cmd_*` entry per CLI subcommand. A command resolves paths, builds a
//! use case, runs it and renders the result; nothing below this layer
//! prints.

mod definition;

pub mod build;
pub mod check;
pub mod clean;
pub mod diff;
pub mod images;
pub mod init;
pub mod inspect;
pub mod push;
pub mod run;
pub mod smoke;
