//! Local filesystem operations
//!
//! Everything the build pipeline needs to stage, hash and promote image
//! trees. Writes are atomic (tempfile + rename) and promotion swaps whole
//! directories so a failed build never leaves a half-written image behind.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::domain::value_objects::{Digest, IgnorePatterns, IGNORE_FILE};
use crate::error::{KilnError, KilnResult};

/// Files copied by [`copy_tree`], split into fresh copies and overwrites.
///
/// Paths are relative to the destination root, `/`-separated, sorted.
#[derive(Debug, Default, Clone)]
pub struct CopyOutcome {
    pub copied: Vec<String>,
    pub replaced: Vec<String>,
}

/// Resolve symlinks and reject paths that leave `root`.
///
/// Both paths must exist; the canonical form of `path` is returned so later
/// operations use the resolved location.
pub fn ensure_within(root: &Path, path: &Path) -> KilnResult<std::path::PathBuf> {
    let canonical_root = root.canonicalize()?;
    let canonical = path.canonicalize()?;
    if !canonical.starts_with(&canonical_root) {
        return Err(KilnError::PathEscape {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        });
    }
    Ok(canonical)
}

/// Write `content` to `path` atomically.
///
/// Creates parent directories, writes to a sibling temp file and renames it
/// into place so readers never observe a partial file.
pub fn write_atomic(path: &Path, content: &str) -> KilnResult<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(path).map_err(|err| KilnError::Io(err.error))?;
    Ok(())
}

/// Copy a single file, creating the destination's parent directories.
pub fn copy_file(src: &Path, dst: &Path) -> KilnResult<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dst)?;
    Ok(())
}

/// Compute the sha256 digest of a file's content.
pub fn hash_file(path: &Path) -> KilnResult<Digest> {
    let content = fs::read(path)?;
    Ok(Digest::from_bytes(&content))
}

/// Recursively copy `src` into `dst`, merging into whatever is already there.
///
/// Entries matched by `ignore` are skipped, as is a root-level `.kilnignore`
/// file (it describes the copy, it is not payload). Symlinks and other
/// special files are not carried into images.
pub fn copy_tree(src: &Path, dst: &Path, ignore: &IgnorePatterns) -> KilnResult<CopyOutcome> {
    let mut outcome = CopyOutcome::default();
    fs::create_dir_all(dst)?;
    copy_tree_inner(src, dst, Path::new(""), ignore, &mut outcome)?;
    outcome.copied.sort();
    outcome.replaced.sort();
    Ok(outcome)
}

fn copy_tree_inner(
    src: &Path,
    dst: &Path,
    rel: &Path,
    ignore: &IgnorePatterns,
    outcome: &mut CopyOutcome,
) -> KilnResult<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let name = entry.file_name();
        let child_rel = rel.join(&name);
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            if ignore.is_ignored(&child_rel, true) {
                continue;
            }
            copy_tree_inner(&entry.path(), &dst.join(&name), &child_rel, ignore, outcome)?;
        } else if file_type.is_file() {
            if rel.as_os_str().is_empty() && name == IGNORE_FILE {
                continue;
            }
            if ignore.is_ignored(&child_rel, false) {
                continue;
            }

            let dst_path = dst.join(&name);
            let replaced = dst_path.is_file();
            copy_file(&entry.path(), &dst_path)?;

            let rel_str = rel_string(&child_rel);
            if replaced {
                outcome.replaced.push(rel_str.clone());
            }
            outcome.copied.push(rel_str);
        }
    }
    Ok(())
}

/// Walk `root` and hash every regular file.
///
/// Keys are `/`-separated paths relative to `root`. A missing or empty root
/// yields an empty map.
pub fn collect_files(root: &Path) -> KilnResult<BTreeMap<String, Digest>> {
    let mut files = BTreeMap::new();
    if root.is_dir() {
        collect_files_inner(root, Path::new(""), &mut files)?;
    }
    Ok(files)
}

fn collect_files_inner(
    dir: &Path,
    rel: &Path,
    files: &mut BTreeMap<String, Digest>,
) -> KilnResult<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let child_rel = rel.join(&name);
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            collect_files_inner(&entry.path(), &child_rel, files)?;
        } else if file_type.is_file() {
            files.insert(rel_string(&child_rel), hash_file(&entry.path())?);
        }
    }
    Ok(())
}

/// Remove a directory tree, treating an already-missing tree as success.
pub fn remove_tree(path: &Path) -> KilnResult<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

/// Move a fully staged directory into its final location.
///
/// Any existing tree at `target` is parked under a `~` suffix for the
/// duration of the swap and restored if the rename fails. `staged` must live
/// on the same filesystem as `target` for the rename to be atomic.
pub fn promote_dir(staged: &Path, target: &Path) -> KilnResult<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }

    // Tag and name charsets exclude '~', so the parking slot can never
    // collide with a real image directory.
    let trash = match target.file_name() {
        Some(name) => {
            let mut parked = name.to_os_string();
            parked.push("~");
            target.with_file_name(parked)
        }
        None => {
            return Err(KilnError::StoreCorrupted {
                path: target.to_path_buf(),
                message: "image directory has no name".to_string(),
            })
        }
    };

    remove_tree(&trash)?;
    let had_previous = target.exists();
    if had_previous {
        fs::rename(target, &trash)?;
    }

    match fs::rename(staged, target) {
        Ok(()) => {
            if had_previous {
                remove_tree(&trash)?;
            }
            Ok(())
        }
        Err(err) => {
            if had_previous {
                let _ = fs::rename(&trash, target);
            }
            Err(err.into())
        }
    }
}

/// Render a relative path with `/` separators regardless of platform.
pub fn rel_string(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
