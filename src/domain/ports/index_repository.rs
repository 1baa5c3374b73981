//! IndexRepository port - abstraction for the store index
//!
//! Mutating operations take the store lock for their whole read-modify-write
//! cycle, so concurrent builds against one store serialize on index updates.

use std::path::Path;

use crate::domain::entities::{IndexEntry, StoreIndex};
use crate::domain::value_objects::ImageRef;
use crate::error::KilnResult;

/// Abstract store index persistence
pub trait IndexRepository {
    /// Load the index; a store without one yet reads as empty
    fn load(&self, store: &Path) -> KilnResult<StoreIndex>;

    /// Insert or replace one entry under the store lock
    fn upsert(&self, store: &Path, entry: IndexEntry) -> KilnResult<()>;

    /// Remove one entry under the store lock, returning it if present
    fn remove(&self, store: &Path, image: &ImageRef) -> KilnResult<Option<IndexEntry>>;
}
