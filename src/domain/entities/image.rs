//! Image Manifest Entity
//!
//! Metadata for one built image: identity, digest, the environment defaults
//! stamped at assembly time, the fixed startup command, and the per-file
//! digest table of the assembled rootfs. Persisted as `manifest.toml` next
//! to the image's `rootfs/`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::value_objects::Digest;

/// Current manifest.toml format version
pub const MANIFEST_FORMAT_VERSION: u32 = 1;

/// Output-buffering toggle stamped into every image
///
/// The packaged services are Python web apps; with this set their log lines
/// are flushed to the standard streams immediately instead of batched.
pub const UNBUFFERED_ENV_NAME: &str = "PYTHONUNBUFFERED";
pub const UNBUFFERED_ENV_VALUE: &str = "1";

/// Fixed startup command of an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Render as a single shell-like line for display
    pub fn display_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    /// Value following a flag (e.g. `--port`), if present
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        let mut args = self.args.iter();
        while let Some(arg) = args.next() {
            if arg == flag {
                return args.next().map(|s| s.as_str());
            }
            if let Some(value) = arg.strip_prefix(flag).and_then(|rest| rest.strip_prefix('=')) {
                return Some(value);
            }
        }
        None
    }
}

/// A built image's manifest
#[derive(Debug, Clone)]
pub struct ImageManifest {
    pub version: u32,
    pub name: String,
    pub tag: String,
    pub digest: Digest,
    pub created_at: DateTime<Utc>,
    pub exposed_port: u16,
    /// Rootfs-relative path of the entry-point file
    pub entrypoint: String,
    /// Environment defaults; placeholders stay empty until run time
    pub env: BTreeMap<String, String>,
    pub command: CommandSpec,
    /// Resolved manifest dependencies, name -> version
    pub packages: BTreeMap<String, String>,
    /// Resolved OS-level tools, name -> version
    pub system_packages: BTreeMap<String, String>,
    /// Every rootfs-relative file path -> content digest
    pub files: BTreeMap<String, Digest>,
}

impl ImageManifest {
    /// `name:tag` form used everywhere images are addressed
    pub fn reference(&self) -> String {
        format!("{}:{}", self.name, self.tag)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// True when the always-stamped unbuffered toggle is present
    pub fn is_unbuffered(&self) -> bool {
        self.env.get(UNBUFFERED_ENV_NAME).map(String::as_str) == Some(UNBUFFERED_ENV_VALUE)
    }

    /// Compose the child environment for a launch
    ///
    /// Image defaults first, then run-time overrides; overrides win on
    /// collision and may introduce variables the image never declared.
    pub fn composed_env(&self, overrides: &[(String, String)]) -> BTreeMap<String, String> {
        let mut env = self.env.clone();
        for (key, value) in overrides {
            env.insert(key.clone(), value.clone());
        }
        env
    }
}
