//! Store Index Entity
//!
//! The store-level catalog of built images, persisted as `index.toml` at the
//! store root and rewritten under an exclusive lock. One entry per
//! `name:tag`; rebuilding an image upserts its entry.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{Digest, ImageRef};

/// Current index.toml format version
pub const INDEX_FORMAT_VERSION: u32 = 1;

/// One built image as recorded in the store index
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub name: String,
    pub tag: String,
    pub digest: Digest,
    pub created_at: DateTime<Utc>,
    pub file_count: usize,
}

impl IndexEntry {
    pub fn reference(&self) -> String {
        format!("{}:{}", self.name, self.tag)
    }
}

/// Catalog of every image in the store
#[derive(Debug, Clone)]
pub struct StoreIndex {
    pub version: u32,
    entries: BTreeMap<String, IndexEntry>,
}

impl StoreIndex {
    pub fn new() -> Self {
        Self {
            version: INDEX_FORMAT_VERSION,
            entries: BTreeMap::new(),
        }
    }

    /// Insert or replace the entry for its `name:tag`
    pub fn upsert(&mut self, entry: IndexEntry) {
        self.entries.insert(entry.reference(), entry);
    }

    /// Remove an image, returning its entry if it existed
    pub fn remove(&mut self, image: &ImageRef) -> Option<IndexEntry> {
        self.entries.remove(&image.to_string())
    }

    pub fn get(&self, image: &ImageRef) -> Option<&IndexEntry> {
        self.entries.get(&image.to_string())
    }

    pub fn contains(&self, image: &ImageRef) -> bool {
        self.entries.contains_key(&image.to_string())
    }

    /// Entries in key order (`name:tag` ascending)
    pub fn iter(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume into entries in key order
    pub fn into_entries(self) -> Vec<IndexEntry> {
        self.entries.into_values().collect()
    }
}

impl Default for StoreIndex {
    fn default() -> Self {
        Self::new()
    }
}
