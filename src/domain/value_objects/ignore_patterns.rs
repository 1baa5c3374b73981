//! Ignore patterns for staged tree copies
//!
//! A base layout may ship a `.kilnignore` file with gitignore syntax so that
//! caches, virtualenvs and editor droppings never land in an image.

use std::fs;
use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::error::{KilnError, KilnResult};

/// File name looked for in the root of a copied tree.
pub const IGNORE_FILE: &str = ".kilnignore";

/// Hard cap on the ignore file size (64 KiB).
const MAX_FILE_SIZE: u64 = 64 * 1024;

/// Patterns loaded from a `.kilnignore` file.
///
/// Uses the `ignore` crate for gitignore-compatible matching.
#[derive(Debug)]
pub struct IgnorePatterns {
    matcher: Gitignore,
    pattern_count: usize,
}

impl Default for IgnorePatterns {
    fn default() -> Self {
        Self::empty()
    }
}

impl IgnorePatterns {
    /// Pattern set that matches nothing.
    pub fn empty() -> Self {
        let matcher = GitignoreBuilder::new("")
            .build()
            .expect("empty gitignore always builds");
        Self {
            matcher,
            pattern_count: 0,
        }
    }

    /// Load `.kilnignore` from `root`.
    ///
    /// Returns an empty set when the file does not exist.
    pub fn load(root: &Path) -> KilnResult<Self> {
        let file = root.join(IGNORE_FILE);
        if !file.exists() {
            return Ok(Self::empty());
        }

        let size = fs::metadata(&file)?.len();
        if size > MAX_FILE_SIZE {
            return Err(KilnError::IgnoreFile {
                file,
                message: format!("{size} bytes exceeds the {MAX_FILE_SIZE} byte limit"),
            });
        }

        let content = fs::read_to_string(&file)?;
        Self::from_content(root, &file, &content)
    }

    /// Parse patterns from in-memory content.
    pub fn from_content(root: &Path, file: &Path, content: &str) -> KilnResult<Self> {
        let mut builder = GitignoreBuilder::new(root);
        let mut pattern_count = 0;

        for (index, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            pattern_count += 1;
            if let Err(err) = builder.add_line(Some(file.to_path_buf()), line) {
                return Err(KilnError::IgnoreFile {
                    file: file.to_path_buf(),
                    message: format!("line {}: {}", index + 1, err),
                });
            }
        }

        let matcher = builder.build().map_err(|err| KilnError::IgnoreFile {
            file: file.to_path_buf(),
            message: err.to_string(),
        })?;

        Ok(Self {
            matcher,
            pattern_count,
        })
    }

    /// Whether `rel_path` (relative to the copied root) should be skipped.
    ///
    /// `is_dir` must be true when the path is a directory so directory
    /// patterns like `drafts/` match.
    pub fn is_ignored(&self, rel_path: &Path, is_dir: bool) -> bool {
        self.matcher
            .matched_path_or_any_parents(rel_path, is_dir)
            .is_ignore()
    }

    /// Number of patterns loaded.
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// True when no patterns were loaded.
    pub fn is_empty(&self) -> bool {
        self.pattern_count == 0
    }
}
