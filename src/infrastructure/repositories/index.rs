//! TOML Store Index Repository
//!
//! Persists the image catalog at `<store>/index.toml`. Mutations hold an
//! exclusive lock on `<store>/index.lock` for their whole read-modify-write
//! cycle, so concurrent builds against one store serialize here.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{IndexEntry, StoreIndex, INDEX_FORMAT_VERSION};
use crate::domain::ports::IndexRepository;
use crate::domain::value_objects::{Digest, ImageRef};
use crate::error::{KilnError, KilnResult};
use crate::infrastructure::fs::write_atomic;
use crate::infrastructure::repositories::store;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlIndexEntry {
    name: String,
    tag: String,
    digest: String,
    created_at: DateTime<Utc>,
    file_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlIndex {
    version: u32,
    #[serde(default)]
    images: Vec<TomlIndexEntry>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TomlIndexRepository;

impl TomlIndexRepository {
    pub fn new() -> Self {
        Self
    }

    fn load_from_disk(store_root: &Path) -> KilnResult<StoreIndex> {
        let path = store::index_path(store_root);
        if !path.exists() {
            return Ok(StoreIndex::new());
        }

        let content = fs::read_to_string(&path)?;
        let parsed: TomlIndex =
            toml::from_str(&content).map_err(|err| KilnError::StoreCorrupted {
                path: path.clone(),
                message: err.to_string(),
            })?;

        if parsed.version != INDEX_FORMAT_VERSION {
            return Err(KilnError::StoreCorrupted {
                path,
                message: format!(
                    "index version {} is not supported (supported: {})",
                    parsed.version, INDEX_FORMAT_VERSION
                ),
            });
        }

        Ok(from_toml(parsed))
    }

    fn save_to_disk(store_root: &Path, index: &StoreIndex) -> KilnResult<()> {
        let content = toml::to_string_pretty(&to_toml(index))
            .map_err(|err| KilnError::Io(std::io::Error::other(err)))?;
        write_atomic(&store::index_path(store_root), &content)
    }

    fn with_lock<T>(
        store_root: &Path,
        operate: impl FnOnce() -> KilnResult<T>,
    ) -> KilnResult<T> {
        fs::create_dir_all(store_root)?;
        let lock_file = fs::File::create(store::index_lock_path(store_root))?;
        lock_file.lock_exclusive()?;

        let result = operate();

        let _ = fs2::FileExt::unlock(&lock_file);
        result
    }
}

impl IndexRepository for TomlIndexRepository {
    fn load(&self, store_root: &Path) -> KilnResult<StoreIndex> {
        Self::load_from_disk(store_root)
    }

    fn upsert(&self, store_root: &Path, entry: IndexEntry) -> KilnResult<()> {
        Self::with_lock(store_root, || {
            let mut index = Self::load_from_disk(store_root)?;
            index.upsert(entry);
            Self::save_to_disk(store_root, &index)
        })
    }

    fn remove(&self, store_root: &Path, image: &ImageRef) -> KilnResult<Option<IndexEntry>> {
        Self::with_lock(store_root, || {
            let mut index = Self::load_from_disk(store_root)?;
            let removed = index.remove(image);
            if removed.is_some() {
                Self::save_to_disk(store_root, &index)?;
            }
            Ok(removed)
        })
    }
}

fn from_toml(index: TomlIndex) -> StoreIndex {
    let mut result = StoreIndex::new();
    result.version = index.version;
    for entry in index.images {
        result.upsert(IndexEntry {
            name: entry.name,
            tag: entry.tag,
            digest: Digest::from(entry.digest),
            created_at: entry.created_at,
            file_count: entry.file_count,
        });
    }
    result
}

fn to_toml(index: &StoreIndex) -> TomlIndex {
    TomlIndex {
        version: index.version,
        images: index
            .iter()
            .map(|entry| TomlIndexEntry {
                name: entry.name.clone(),
                tag: entry.tag.clone(),
                digest: entry.digest.to_string(),
                created_at: entry.created_at,
                file_count: entry.file_count,
            })
            .collect(),
    }
}
