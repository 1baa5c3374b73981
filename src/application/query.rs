//! Query Use Cases
//!
//! Read-only store views: list the index, inspect one image's manifest,
//! and compare two built images.

use std::fs;
use std::path::Path;

use crate::domain::entities::{ImageManifest, IndexEntry};
use crate::domain::ports::IndexRepository;
use crate::domain::services::{Differ, LineDiff};
use crate::domain::value_objects::ImageRef;
use crate::error::{KilnError, KilnResult};
use crate::infrastructure::repositories::{load_image_manifest, store};

/// Result of comparing two built images
#[derive(Debug, Clone)]
pub struct ImageDiff {
    /// Older side of the comparison (`name:tag`)
    pub left: String,
    /// Newer side of the comparison (`name:tag`)
    pub right: String,
    /// Rootfs paths present only in the right image
    pub added: Vec<String>,
    /// Rootfs paths present only in the left image
    pub removed: Vec<String>,
    /// Rootfs paths present in both with different content digests
    pub changed: Vec<String>,
    /// Line diff of the two manifests' metadata (file table excluded; the
    /// structural lists above already cover it)
    pub metadata: LineDiff,
}

impl ImageDiff {
    pub fn is_identical(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.changed.is_empty()
            && !self.metadata.has_changes
    }

    pub fn file_change_count(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len()
    }
}

/// Query use case - read-only views over the image store
pub struct QueryUseCase<I>
where
    I: IndexRepository,
{
    index: I,
}

impl<I> QueryUseCase<I>
where
    I: IndexRepository,
{
    pub fn new(index: I) -> Self {
        Self { index }
    }

    /// All indexed images, in `name:tag` order.
    pub fn images(&self, store_root: &Path) -> KilnResult<Vec<IndexEntry>> {
        Ok(self.index.load(store_root)?.into_entries())
    }

    /// One image's full manifest.
    pub fn inspect(&self, store_root: &Path, image: &ImageRef) -> KilnResult<ImageManifest> {
        load_present(store_root, image).map(|(manifest, _)| manifest)
    }

    /// Compare two built images: file-level deltas plus a metadata diff.
    pub fn diff(
        &self,
        store_root: &Path,
        left: &ImageRef,
        right: &ImageRef,
    ) -> KilnResult<ImageDiff> {
        let (left_manifest, left_text) = load_present(store_root, left)?;
        let (right_manifest, right_text) = load_present(store_root, right)?;

        let mut added = Vec::new();
        let mut removed = Vec::new();
        let mut changed = Vec::new();

        for (path, digest) in &right_manifest.files {
            match left_manifest.files.get(path) {
                None => added.push(path.clone()),
                Some(old) if old != digest => changed.push(path.clone()),
                Some(_) => {}
            }
        }
        for path in left_manifest.files.keys() {
            if !right_manifest.files.contains_key(path) {
                removed.push(path.clone());
            }
        }

        let metadata = Differ::new().diff(
            metadata_section(&left_text),
            metadata_section(&right_text),
        );

        Ok(ImageDiff {
            left: left.to_string(),
            right: right.to_string(),
            added,
            removed,
            changed,
            metadata,
        })
    }
}

/// Load an image's manifest together with its on-disk text.
fn load_present(store_root: &Path, image: &ImageRef) -> KilnResult<(ImageManifest, String)> {
    let image_dir = store::image_dir(store_root, image);
    let manifest_path = store::manifest_path(&image_dir);
    if !manifest_path.is_file() {
        return Err(KilnError::ImageNotFound {
            reference: image.to_string(),
        });
    }
    let manifest = load_image_manifest(&image_dir)?;
    let text = fs::read_to_string(&manifest_path)?;
    Ok((manifest, text))
}

/// The manifest text up to its `[files]` table.
///
/// The serializer always emits `[files]` last, so truncating there leaves
/// exactly the metadata sections.
fn metadata_section(text: &str) -> &str {
    match text.find("\n[files]") {
        Some(at) => &text[..at + 1],
        None => text,
    }
}
