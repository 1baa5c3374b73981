//! Image store layout
//!
//! ```text
//! <store>/
//!   index.toml             catalog of built images
//!   index.lock             advisory lock for index mutations
//!   images/<name>/<tag>/   one directory per image
//!     manifest.toml
//!     rootfs/
//!   tmp/                   staging area for in-flight builds
//! ```
//!
//! Staging lives inside the store so the final promotion is a same-filesystem
//! rename.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::ImageRef;

/// Index file name at the store root.
pub const INDEX_FILE: &str = "index.toml";

/// Lock file guarding index mutations.
pub const INDEX_LOCK_FILE: &str = "index.lock";

/// Manifest file name inside an image directory.
pub const MANIFEST_FILE: &str = "manifest.toml";

/// Root filesystem directory inside an image directory.
pub const ROOTFS_DIR: &str = "rootfs";

/// Staging area for in-flight builds, relative to the store root.
pub const STAGING_DIR: &str = "tmp";

pub fn index_path(store: &Path) -> PathBuf {
    store.join(INDEX_FILE)
}

pub fn index_lock_path(store: &Path) -> PathBuf {
    store.join(INDEX_LOCK_FILE)
}

/// Directory holding one image's manifest and rootfs.
pub fn image_dir(store: &Path, image: &ImageRef) -> PathBuf {
    store.join(image.store_dir())
}

pub fn manifest_path(image_dir: &Path) -> PathBuf {
    image_dir.join(MANIFEST_FILE)
}

pub fn rootfs_dir(image_dir: &Path) -> PathBuf {
    image_dir.join(ROOTFS_DIR)
}

pub fn staging_dir(store: &Path) -> PathBuf {
    store.join(STAGING_DIR)
}
