//! Content Digest Value Object
//!
//! A validated, immutable SHA-256 digest. File digests feed change detection
//! and image identity; the image digest is computed over the sorted per-file
//! digest table so it is stable across build machines.

use std::collections::BTreeMap;
use std::fmt;

/// Content digest value object
///
/// Wraps a SHA-256 digest string with the `sha256:` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest(String);

impl Digest {
    /// Prefix for SHA-256 digests
    pub const PREFIX: &'static str = "sha256:";

    /// Create a new Digest from a raw digest string (with or without prefix)
    pub fn new(raw: &str) -> Self {
        if raw.starts_with(Self::PREFIX) {
            Self(raw.to_string())
        } else {
            Self(format!("{}{}", Self::PREFIX, raw))
        }
    }

    /// Compute the digest of a byte slice
    pub fn from_bytes(bytes: &[u8]) -> Self {
        use sha2::{Digest as _, Sha256};
        let hash = Sha256::digest(bytes);
        Self(format!("{}{:x}", Self::PREFIX, hash))
    }

    /// Compute an image digest over a sorted path -> file-digest table
    ///
    /// The table is a `BTreeMap`, so iteration order (and therefore the
    /// combined digest) is deterministic for the same contents.
    pub fn combine(files: &BTreeMap<String, Digest>) -> Self {
        use sha2::{Digest as _, Sha256};
        let mut hasher = Sha256::new();
        for (path, digest) in files {
            hasher.update(path.as_bytes());
            hasher.update(b"\0");
            hasher.update(digest.hex().as_bytes());
            hasher.update(b"\n");
        }
        Self(format!("{}{:x}", Self::PREFIX, hasher.finalize()))
    }

    /// Get the full digest string with prefix
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get just the hex part without prefix
    pub fn hex(&self) -> &str {
        self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0)
    }

    /// Short form for display (first 12 hex chars)
    pub fn short(&self) -> &str {
        let hex = self.hex();
        &hex[..hex.len().min(12)]
    }

    /// Check if this digest matches another
    pub fn matches(&self, other: &Digest) -> bool {
        self.0 == other.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Digest {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl From<&str> for Digest {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
