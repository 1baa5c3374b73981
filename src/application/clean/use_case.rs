//! Clean Use Case
//!
//! Removes built images from the store. Callers preview first, confirm, then
//! execute; the index is the authority on what exists, and every index
//! mutation goes through the store lock.

use crate::domain::entities::IndexEntry;
use crate::domain::ports::IndexRepository;
use crate::domain::value_objects::ImageRef;
use crate::error::{KilnError, KilnResult};
use crate::infrastructure::fs::remove_tree;
use crate::infrastructure::repositories::store;

use super::options::CleanOptions;
use super::result::CleanResult;

/// Clean use case - removes images recorded in the store index
pub struct CleanUseCase<I>
where
    I: IndexRepository,
{
    index: I,
}

impl<I> CleanUseCase<I>
where
    I: IndexRepository,
{
    pub fn new(index: I) -> Self {
        Self { index }
    }

    /// What a clean with these options would remove.
    ///
    /// Returns the entries so the caller can show them before confirming.
    pub fn preview(&self, options: &CleanOptions) -> KilnResult<Vec<IndexEntry>> {
        let index = self.index.load(&options.store)?;
        match &options.image {
            Some(image) => match index.get(image) {
                Some(entry) => Ok(vec![entry.clone()]),
                None => Err(KilnError::ImageNotFound {
                    reference: image.to_string(),
                }),
            },
            None if options.all => Ok(index.into_entries()),
            None => Ok(Vec::new()),
        }
    }

    /// Remove the previewed images. Call after the caller confirmed.
    ///
    /// The index entry goes first, then the image directory; a directory
    /// whose removal fails is already invisible to every other command.
    pub fn execute_confirmed(&self, options: &CleanOptions) -> KilnResult<CleanResult> {
        let targets = self.preview(options)?;
        if options.dry_run {
            return Ok(CleanResult {
                removed: targets,
                dry_run: true,
            });
        }

        for entry in &targets {
            let image = ImageRef::new(&entry.name, &entry.tag)?;
            self.index.remove(&options.store, &image)?;
            remove_tree(&store::image_dir(&options.store, &image))?;
        }

        Ok(CleanResult {
            removed: targets,
            dry_run: false,
        })
    }
}
