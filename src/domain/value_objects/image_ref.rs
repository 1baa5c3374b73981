//! Image Reference Value Object
//!
//! `name[:tag]` as typed on the command line and used as the store key.
//! Names and tags share one charset: a leading lowercase alphanumeric
//! followed by lowercase alphanumerics, `.`, `_` or `-`.

use std::fmt;

use crate::error::{KilnError, KilnResult};

/// Tag assumed when a reference omits one
pub const DEFAULT_TAG: &str = "latest";

/// A parsed `name[:tag]` image reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageRef {
    name: String,
    tag: String,
}

impl ImageRef {
    /// Build a reference from already-validated parts
    pub fn new(name: &str, tag: &str) -> KilnResult<Self> {
        if !is_valid_name(name) {
            return Err(KilnError::InvalidImageName {
                name: name.to_string(),
            });
        }
        if !is_valid_name(tag) {
            return Err(KilnError::InvalidImageTag {
                tag: tag.to_string(),
            });
        }
        Ok(Self {
            name: name.to_string(),
            tag: tag.to_string(),
        })
    }

    /// Parse `name` or `name:tag`
    pub fn parse(input: &str) -> KilnResult<Self> {
        let mut parts = input.splitn(2, ':');
        let name = parts.next().unwrap_or_default();
        let tag = parts.next().unwrap_or(DEFAULT_TAG);
        if name.is_empty() || tag.is_empty() || tag.contains(':') {
            return Err(KilnError::InvalidImageRef {
                input: input.to_string(),
            });
        }
        Self::new(name, tag).map_err(|_| KilnError::InvalidImageRef {
            input: input.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Store-relative directory for this image (`images/<name>/<tag>`)
    pub fn store_dir(&self) -> std::path::PathBuf {
        std::path::Path::new("images").join(&self.name).join(&self.tag)
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.tag)
    }
}

/// Shared charset rule for image names and tags
pub fn is_valid_name(value: &str) -> bool {
    let mut bytes = value.bytes();
    match bytes.next() {
        Some(first) if first.is_ascii_lowercase() || first.is_ascii_digit() => {}
        _ => return false,
    }
    value
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'.' || b == b'_' || b == b'-')
}
