//! Custom assertion macros for CLI integration tests.
//!
//! These macros provide descriptive failure messages to aid debugging.

use std::path::Path;

/// List all files in a directory recursively (for debugging)
pub fn list_all_files(dir: &Path) -> Vec<String> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                for sub in list_all_files(&path) {
                    files.push(sub);
                }
            } else {
                files.push(path.display().to_string());
            }
        }
    }
    files
}

/// Assert that an image landed in the store with a manifest and rootfs.
///
/// # Example
/// ```ignore
/// assert_stored!(env, "web", "latest");
/// ```
#[macro_export]
macro_rules! assert_stored {
    ($env:expr, $name:expr, $tag:expr) => {
        let image_dir = $env.image_dir($name, $tag);
        assert!(
            image_dir.join("manifest.toml").is_file() && image_dir.join("rootfs").is_dir(),
            "Expected image '{}:{}' in the store, but it isn't there.\n\
             Store root: {:?}\n\
             Files found:\n  {}",
            $name,
            $tag,
            $env.store_root.path(),
            $crate::common::list_all_files($env.store_root.path()).join("\n  ")
        );
    };
}

/// Assert that an image is NOT present in the store.
///
/// # Example
/// ```ignore
/// assert_not_stored!(env, "web", "latest");
/// ```
#[macro_export]
macro_rules! assert_not_stored {
    ($env:expr, $name:expr, $tag:expr) => {
        let image_dir = $env.image_dir($name, $tag);
        assert!(
            !image_dir.exists(),
            "Expected image '{}:{}' to NOT be in the store, but it is.\n\
             Store root: {:?}",
            $name,
            $tag,
            $env.store_root.path()
        );
    };
}

/// Assert that output (stdout or stderr) contains expected pattern.
///
/// # Example
/// ```ignore
/// assert_output_contains!(result, "Built web:latest");
/// ```
#[macro_export]
macro_rules! assert_output_contains {
    ($result:expr, $pattern:expr) => {
        assert!(
            $result.stdout.contains($pattern) || $result.stderr.contains($pattern),
            "Expected output to contain '{}'\n\
             stdout:\n{}\n\
             stderr:\n{}",
            $pattern,
            $result.stdout,
            $result.stderr
        );
    };
}

/// Assert that output does NOT contain a pattern.
///
/// # Example
/// ```ignore
/// assert_output_not_contains!(result, "panicked");
/// ```
#[macro_export]
macro_rules! assert_output_not_contains {
    ($result:expr, $pattern:expr) => {
        assert!(
            !$result.stdout.contains($pattern) && !$result.stderr.contains($pattern),
            "Expected output to NOT contain '{}'\n\
             stdout:\n{}\n\
             stderr:\n{}",
            $pattern,
            $result.stdout,
            $result.stderr
        );
    };
}
