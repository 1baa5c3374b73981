//! Clean options

use std::path::PathBuf;

use crate::domain::value_objects::ImageRef;

/// Options for the clean command
#[derive(Debug, Clone)]
pub struct CleanOptions {
    /// Image store root
    pub store: PathBuf,
    /// Specific image to remove (None with `all` removes everything)
    pub image: Option<ImageRef>,
    /// Remove every indexed image
    pub all: bool,
    /// Report what would be removed without touching the store
    pub dry_run: bool,
}

impl CleanOptions {
    pub fn new(store: impl Into<PathBuf>) -> Self {
        Self {
            store: store.into(),
            image: None,
            all: false,
            dry_run: false,
        }
    }

    pub fn with_image(mut self, image: ImageRef) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_all(mut self, all: bool) -> Self {
        self.all = all;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
