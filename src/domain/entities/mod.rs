//! Domain Entities
//!
//! Core domain entities that have identity and lifecycle.
//! - `ImageManifest` - metadata of one built image
//! - `StoreIndex` - the store-level catalog of built images

mod image;
mod index;

pub use image::{
    CommandSpec, ImageManifest, MANIFEST_FORMAT_VERSION, UNBUFFERED_ENV_NAME, UNBUFFERED_ENV_VALUE,
};
pub use index::{IndexEntry, StoreIndex, INDEX_FORMAT_VERSION};
