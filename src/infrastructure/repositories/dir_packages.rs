//! Directory-backed package repository
//!
//! Serves packages from a local tree shaped like
//! `<root>/<name>/<version>/{lib/,bin/}`. A package's `lib/` tree merges
//! into the stage's lib directory (later packages overwrite colliding
//! paths), `bin/` entries land flat in the stage's bin directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::domain::ports::{
    InstallTarget, InstalledPackage, PackageRepository, RepoError, RepoResult,
};
use crate::domain::value_objects::Version;
use crate::infrastructure::fs::rel_string;

pub struct DirRepository {
    root: PathBuf,
}

impl DirRepository {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn package_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn copy_payload(
        name: &str,
        src_dir: &Path,
        dst_dir: &Path,
        rel: &Path,
        deadline: Option<Instant>,
        files: &mut Vec<String>,
        overwrites: &mut Vec<String>,
    ) -> RepoResult<()> {
        for entry in fs::read_dir(src_dir).map_err(|e| io_error(name, e))? {
            let entry = entry.map_err(|e| io_error(name, e))?;
            let entry_name = entry.file_name();
            let child_rel = rel.join(&entry_name);
            let file_type = entry.file_type().map_err(|e| io_error(name, e))?;

            if file_type.is_dir() {
                Self::copy_payload(
                    name,
                    &entry.path(),
                    &dst_dir.join(&entry_name),
                    &child_rel,
                    deadline,
                    files,
                    overwrites,
                )?;
            } else if file_type.is_file() {
                check_deadline(name, deadline)?;

                let dst_path = dst_dir.join(&entry_name);
                if dst_path.is_file() {
                    overwrites.push(rel_string(&child_rel));
                }
                if let Some(parent) = dst_path.parent() {
                    fs::create_dir_all(parent).map_err(|e| io_error(name, e))?;
                }
                fs::copy(entry.path(), &dst_path).map_err(|e| io_error(name, e))?;
                files.push(rel_string(&child_rel));
            }
        }
        Ok(())
    }
}

impl PackageRepository for DirRepository {
    fn available_versions(&self, name: &str) -> RepoResult<Vec<Version>> {
        if !self.root.is_dir() {
            return Err(RepoError::Unavailable {
                path: self.root.clone(),
            });
        }

        let package_dir = self.package_dir(name);
        if !package_dir.is_dir() {
            return Err(RepoError::UnknownPackage {
                name: name.to_string(),
            });
        }

        let mut versions = Vec::new();
        for entry in fs::read_dir(&package_dir).map_err(|e| io_error(name, e))? {
            let entry = entry.map_err(|e| io_error(name, e))?;
            if !entry.file_type().map_err(|e| io_error(name, e))?.is_dir() {
                continue;
            }
            // Stray non-version directories (caches, scratch) are ignored.
            if let Some(text) = entry.file_name().to_str() {
                if let Ok(version) = text.parse::<Version>() {
                    versions.push(version);
                }
            }
        }

        // A package directory with no version subdirectories reads as unknown.
        if versions.is_empty() {
            return Err(RepoError::UnknownPackage {
                name: name.to_string(),
            });
        }
        Ok(versions)
    }

    fn install(
        &self,
        name: &str,
        version: &Version,
        target: &InstallTarget,
        deadline: Option<Instant>,
    ) -> RepoResult<InstalledPackage> {
        check_deadline(name, deadline)?;

        let version_dir = self.package_dir(name).join(version.to_string());
        if !version_dir.is_dir() {
            return Err(RepoError::Unavailable { path: version_dir });
        }

        let mut files = Vec::new();
        let mut overwrites = Vec::new();

        let lib_src = version_dir.join("lib");
        if lib_src.is_dir() {
            Self::copy_payload(
                name,
                &lib_src,
                &target.lib_dir,
                Path::new("lib"),
                deadline,
                &mut files,
                &mut overwrites,
            )?;
        }

        let bin_src = version_dir.join("bin");
        if bin_src.is_dir() {
            Self::copy_payload(
                name,
                &bin_src,
                &target.bin_dir,
                Path::new("bin"),
                deadline,
                &mut files,
                &mut overwrites,
            )?;
        }

        files.sort();
        overwrites.sort();

        Ok(InstalledPackage {
            name: name.to_string(),
            version: version.clone(),
            files,
            overwrites,
        })
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

fn check_deadline(name: &str, deadline: Option<Instant>) -> RepoResult<()> {
    if let Some(deadline) = deadline {
        if Instant::now() >= deadline {
            return Err(RepoError::DeadlineExceeded {
                package: name.to_string(),
            });
        }
    }
    Ok(())
}

fn io_error(name: &str, source: std::io::Error) -> RepoError {
    RepoError::Io {
        package: name.to_string(),
        source,
    }
}
