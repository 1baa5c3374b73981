//! Package Version Value Object
//!
//! Dotted numeric versions (`1`, `0.30`, `2.0.43`) as they appear in
//! dependency manifests and repository directory names. Comparison pads
//! missing segments with zeros, so `1.0` and `1` compare equal while both
//! display exactly as written.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A dotted numeric package version
#[derive(Debug, Clone)]
pub struct Version {
    segments: Vec<u64>,
}

impl Version {
    /// Maximum number of dotted segments accepted
    pub const MAX_SEGMENTS: usize = 3;

    /// Parse a version string like `1.2.3`
    pub fn parse(input: &str) -> Result<Self, String> {
        if input.is_empty() {
            return Err("empty version".to_string());
        }
        let parts: Vec<&str> = input.split('.').collect();
        if parts.len() > Self::MAX_SEGMENTS {
            return Err(format!(
                "too many version segments (max {})",
                Self::MAX_SEGMENTS
            ));
        }
        let mut segments = Vec::with_capacity(parts.len());
        for part in parts {
            if part.is_empty() {
                return Err("empty version segment".to_string());
            }
            if !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format!("non-numeric version segment '{}'", part));
            }
            let value: u64 = part
                .parse()
                .map_err(|_| format!("version segment '{}' out of range", part))?;
            segments.push(value);
        }
        Ok(Self { segments })
    }

    /// Segment at `index`, treating missing segments as zero
    fn segment(&self, index: usize) -> u64 {
        self.segments.get(index).copied().unwrap_or(0)
    }

    /// Segments with trailing zeros stripped (canonical form for Eq/Hash)
    fn normalized(&self) -> &[u64] {
        let mut len = self.segments.len();
        while len > 1 && self.segments[len - 1] == 0 {
            len -= 1;
        }
        &self.segments[..len]
    }
}

impl FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.segments.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", rendered.join("."))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for Version {}

impl std::hash::Hash for Version {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        for i in 0..len {
            match self.segment(i).cmp(&other.segment(i)) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
