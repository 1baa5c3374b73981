//! Repository Implementations
//!
//! Concrete persistence for domain ports plus the image store layout.

mod dir_packages;
mod image_manifest;
mod index;
pub mod store;

pub use dir_packages::DirRepository;
pub use image_manifest::{load_image_manifest, save_image_manifest};
pub use index::TomlIndexRepository;
