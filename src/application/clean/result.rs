//! Clean result types

use crate::domain::entities::IndexEntry;

/// Result of a clean operation
#[derive(Debug, Clone, Default)]
pub struct CleanResult {
    /// Images removed (or, for a dry run, that would be removed)
    pub removed: Vec<IndexEntry>,
    /// True when nothing was actually deleted
    pub dry_run: bool,
}

impl CleanResult {
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    /// Total rootfs files across the removed images
    pub fn file_count(&self) -> usize {
        self.removed.iter().map(|e| e.file_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }
}
