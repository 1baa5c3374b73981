//! Terminal output for the kiln binary.
//!
//! Layered the same way top to bottom: `theme` holds the design tokens,
//! `primitives` and `blocks` compose them, `views` render use-case results,
//! and `events`/`json` drive the two output modes.

pub mod blocks;
pub mod ci;
pub mod context;
pub mod events;
pub mod json;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
