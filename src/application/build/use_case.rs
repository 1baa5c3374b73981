//! Build Use Case
//!
//! Orchestrates the two-stage image build:
//! 1. Parse the dependency manifest and resolve every requirement
//! 2. Builder stage: install resolved packages into a staging tree
//! 3. Runtime stage: base layout, system packages, the builder's
//!    `lib/` + `bin/` trees, the entry-point file, stamped env defaults
//! 4. Hash the assembled rootfs, write the manifest, promote atomically
//! 5. Upsert the store index
//!
//! Stages run strictly sequentially. Any failure aborts the build before
//! promotion, so the store never sees a partial image.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;

use crate::config::Config;
use crate::domain::entities::{
    ImageManifest, IndexEntry, MANIFEST_FORMAT_VERSION, UNBUFFERED_ENV_NAME, UNBUFFERED_ENV_VALUE,
};
use crate::domain::ports::{
    BuildEvent, BuildEventSink, IndexRepository, InstallTarget, InstalledPackage, NoopEventSink,
    PackageRepository, RepoError, Stage,
};
use crate::domain::services::resolver;
use crate::domain::value_objects::{Digest, IgnorePatterns, ImageRef, Requirement, Version};
use crate::error::{KilnError, KilnResult};
use crate::infrastructure::fs::{
    collect_files, copy_file, copy_tree, ensure_within, promote_dir, remove_tree,
};
use crate::infrastructure::repositories::{save_image_manifest, store};
use crate::manifest::parse_manifest_file;

/// Build use case - turns a build definition into a stored image
///
/// Parameterized by its ports so tests can substitute failing or slow
/// package repositories.
pub struct BuildUseCase<R, I>
where
    R: PackageRepository,
    I: IndexRepository,
{
    packages: R,
    index: I,
}

impl<R, I> BuildUseCase<R, I>
where
    R: PackageRepository,
    I: IndexRepository,
{
    pub fn new(packages: R, index: I) -> Self {
        Self { packages, index }
    }

    /// Execute the build silently.
    pub fn execute(&self, config: &Config, options: &super::BuildOptions) -> KilnResult<super::BuildResult> {
        self.execute_with_events(config, options, Arc::new(NoopEventSink))
    }

    /// Execute the build, emitting progress events.
    pub fn execute_with_events(
        &self,
        config: &Config,
        options: &super::BuildOptions,
        events: Arc<dyn BuildEventSink>,
    ) -> KilnResult<super::BuildResult> {
        let started = Instant::now();

        config.validate()?;
        let tag = options
            .tag_override
            .as_deref()
            .unwrap_or(&config.image.tag);
        let image = ImageRef::new(&config.image.name, tag)?;
        let timeout_secs = options.timeout_secs.unwrap_or(config.builder.timeout_secs);

        events.on_event(BuildEvent::Started {
            file: options.file.clone(),
            reference: image.to_string(),
            dry_run: options.dry_run,
        });

        // Everything the build reads is checked before anything is staged.
        let manifest_path = options.project_root.join(&config.builder.manifest);
        let requirements = parse_manifest_file(&manifest_path)?;
        let system_requirements = parse_system_packages(config, &options.file)?;
        let entrypoint_src = self.checked_entrypoint(config, options)?;
        let base_src = self.checked_base(config, options)?;

        let resolved = self.resolve_all(&requirements, &events)?;
        let system_resolved = self.resolve_all(&system_requirements, &events)?;

        if options.dry_run {
            let duration_ms = started.elapsed().as_millis() as u64;
            events.on_event(BuildEvent::Completed {
                reference: image.to_string(),
                digest: String::new(),
                files: 0,
                duration_ms,
                dry_run: true,
            });
            return Ok(super::BuildResult {
                reference: image.to_string(),
                digest: None,
                installed: unstaged_packages(&resolved),
                system_installed: unstaged_packages(&system_resolved),
                file_count: 0,
                warnings: Vec::new(),
                duration_ms,
                dry_run: true,
                image_dir: None,
            });
        }

        // Staging lives inside the store so promotion is an atomic rename.
        let staging_root = store::staging_dir(&options.store);
        std::fs::create_dir_all(&staging_root)?;

        let mut warnings = Vec::new();
        let deadline = Some(Instant::now() + Duration::from_secs(timeout_secs));

        // Builder stage: produce lib/ and bin/ from the resolved packages.
        events.on_event(BuildEvent::StageStarted {
            stage: Stage::Builder,
        });
        let builder_stage = tempfile::Builder::new()
            .prefix("builder-")
            .tempdir_in(&staging_root)?;
        let builder_target = InstallTarget::under(builder_stage.path());
        let installed = self.install_all(
            &resolved,
            &builder_target,
            deadline,
            timeout_secs,
            Stage::Builder,
            &events,
            &mut warnings,
        )?;
        let builder_files: usize = installed.iter().map(|p| p.files.len()).sum();
        events.on_event(BuildEvent::StageCompleted {
            stage: Stage::Builder,
            files: builder_files,
        });

        // Runtime stage: assemble the final image directory.
        events.on_event(BuildEvent::StageStarted {
            stage: Stage::Runtime,
        });
        let image_stage = tempfile::Builder::new()
            .prefix("image-")
            .tempdir_in(&staging_root)?;
        let rootfs = store::rootfs_dir(image_stage.path());
        std::fs::create_dir_all(&rootfs)?;

        if let Some(base) = &base_src {
            let ignore = IgnorePatterns::load(base)?;
            copy_tree(base, &rootfs, &ignore)?;
        }

        let runtime_target = InstallTarget::under(&rootfs);
        let system_installed = self.install_all(
            &system_resolved,
            &runtime_target,
            deadline,
            timeout_secs,
            Stage::Runtime,
            &events,
            &mut warnings,
        )?;

        copy_stage_tree(&builder_target.lib_dir, &runtime_target.lib_dir)?;
        copy_stage_tree(&builder_target.bin_dir, &runtime_target.bin_dir)?;

        let entrypoint_name = entrypoint_file_name(&config.runtime.entrypoint)?;
        copy_file(&entrypoint_src, &rootfs.join(&entrypoint_name))?;
        events.on_event(BuildEvent::EntryPointCopied {
            path: entrypoint_name.clone(),
        });

        let env = stamped_env(config);

        let files = collect_files(&rootfs)?;
        let digest = Digest::combine(&files);
        let file_count = files.len();
        events.on_event(BuildEvent::StageCompleted {
            stage: Stage::Runtime,
            files: file_count,
        });

        let created_at = Utc::now();
        let manifest = ImageManifest {
            version: MANIFEST_FORMAT_VERSION,
            name: image.name().to_string(),
            tag: image.tag().to_string(),
            digest: digest.clone(),
            created_at,
            exposed_port: config.runtime.port,
            entrypoint: entrypoint_name,
            env,
            command: config.effective_command(),
            packages: version_map(&installed),
            system_packages: version_map(&system_installed),
            files,
        };
        save_image_manifest(image_stage.path(), &manifest)?;

        // Promote, then index. The builder stage cleans itself up on drop.
        let target_dir = store::image_dir(&options.store, &image);
        let staged = image_stage.keep();
        if let Err(err) = promote_dir(&staged, &target_dir) {
            let _ = remove_tree(&staged);
            return Err(err);
        }

        self.index.upsert(
            &options.store,
            IndexEntry {
                name: image.name().to_string(),
                tag: image.tag().to_string(),
                digest: digest.clone(),
                created_at,
                file_count,
            },
        )?;

        let duration_ms = started.elapsed().as_millis() as u64;
        events.on_event(BuildEvent::Completed {
            reference: image.to_string(),
            digest: digest.to_string(),
            files: file_count,
            duration_ms,
            dry_run: false,
        });

        Ok(super::BuildResult {
            reference: image.to_string(),
            digest: Some(digest),
            installed,
            system_installed,
            file_count,
            warnings,
            duration_ms,
            dry_run: false,
            image_dir: Some(target_dir),
        })
    }

    /// Resolve every requirement to a concrete version.
    fn resolve_all(
        &self,
        requirements: &[Requirement],
        events: &Arc<dyn BuildEventSink>,
    ) -> KilnResult<Vec<(Requirement, Version)>> {
        let mut resolved = Vec::with_capacity(requirements.len());
        for requirement in requirements {
            let available = self
                .packages
                .available_versions(&requirement.name)
                .map_err(|err| map_repo_error(err, 0))?;

            let version = resolver::best_match(requirement, &available).ok_or_else(|| {
                KilnError::NoMatchingVersion {
                    name: requirement.name.clone(),
                    constraint: requirement.constraint.to_string(),
                    available: resolver::format_available(&available),
                }
            })?;

            if events.wants_detailed_events() {
                events.on_event(BuildEvent::PackageResolved {
                    name: requirement.name.clone(),
                    version: version.to_string(),
                });
            }
            resolved.push((requirement.clone(), version));
        }
        Ok(resolved)
    }

    /// Install every resolved package into the target, in manifest order.
    #[allow(clippy::too_many_arguments)]
    fn install_all(
        &self,
        resolved: &[(Requirement, Version)],
        target: &InstallTarget,
        deadline: Option<Instant>,
        timeout_secs: u64,
        stage: Stage,
        events: &Arc<dyn BuildEventSink>,
        warnings: &mut Vec<String>,
    ) -> KilnResult<Vec<InstalledPackage>> {
        let mut installed = Vec::with_capacity(resolved.len());
        for (requirement, version) in resolved {
            let package = self
                .packages
                .install(&requirement.name, version, target, deadline)
                .map_err(|err| map_repo_error(err, timeout_secs))?;

            if events.wants_detailed_events() {
                events.on_event(BuildEvent::PackageInstalled {
                    stage,
                    name: package.name.clone(),
                    version: package.version.to_string(),
                    files: package.files.len(),
                });
            }
            for path in &package.overwrites {
                let message = format!("{} replaced {}", package.name, path);
                events.on_event(BuildEvent::Warning {
                    message: message.clone(),
                });
                warnings.push(message);
            }
            installed.push(package);
        }
        Ok(installed)
    }

    fn checked_entrypoint(
        &self,
        config: &Config,
        options: &super::BuildOptions,
    ) -> KilnResult<PathBuf> {
        let path = options.project_root.join(&config.runtime.entrypoint);
        if !path.is_file() {
            return Err(KilnError::EntryPointMissing { path });
        }
        ensure_within(&options.project_root, &path)
    }

    fn checked_base(
        &self,
        config: &Config,
        options: &super::BuildOptions,
    ) -> KilnResult<Option<PathBuf>> {
        let Some(base) = &config.base.path else {
            return Ok(None);
        };
        let path = options.project_root.join(base);
        if !path.is_dir() {
            return Err(KilnError::BaseLayoutMissing { path });
        }
        ensure_within(&options.project_root, &path).map(Some)
    }
}

/// Environment defaults stamped into the image.
///
/// The configured placeholders are carried verbatim; the unbuffered toggle
/// is always set, regardless of what the definition says.
fn stamped_env(config: &Config) -> BTreeMap<String, String> {
    let mut env = config.runtime.env.clone();
    env.insert(
        UNBUFFERED_ENV_NAME.to_string(),
        UNBUFFERED_ENV_VALUE.to_string(),
    );
    env
}

fn parse_system_packages(config: &Config, file: &Path) -> KilnResult<Vec<Requirement>> {
    let mut requirements = Vec::with_capacity(config.runtime.system_packages.len());
    for entry in &config.runtime.system_packages {
        let requirement = Requirement::parse(entry).map_err(|message| KilnError::Config {
            file: file.to_path_buf(),
            message: format!("invalid system package '{entry}': {message}"),
        })?;
        requirements.push(requirement);
    }
    Ok(requirements)
}

/// Copy a builder-stage tree into the runtime stage. Absent trees (a build
/// with no packages) are fine.
fn copy_stage_tree(src: &Path, dst: &Path) -> KilnResult<()> {
    if src.is_dir() {
        copy_tree(src, dst, &IgnorePatterns::empty())?;
    }
    Ok(())
}

fn entrypoint_file_name(entrypoint: &Path) -> KilnResult<String> {
    entrypoint
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| KilnError::EntryPointMissing {
            path: entrypoint.to_path_buf(),
        })
}

fn version_map(installed: &[InstalledPackage]) -> BTreeMap<String, String> {
    installed
        .iter()
        .map(|p| (p.name.clone(), p.version.to_string()))
        .collect()
}

/// Dry runs report resolved packages without any staged files.
fn unstaged_packages(resolved: &[(Requirement, Version)]) -> Vec<InstalledPackage> {
    resolved
        .iter()
        .map(|(requirement, version)| InstalledPackage {
            name: requirement.name.clone(),
            version: version.clone(),
            files: Vec::new(),
            overwrites: Vec::new(),
        })
        .collect()
}

fn map_repo_error(err: RepoError, timeout_secs: u64) -> KilnError {
    match err {
        RepoError::UnknownPackage { name } => KilnError::UnknownPackage { name },
        RepoError::DeadlineExceeded { package } => KilnError::InstallTimeout {
            package,
            secs: timeout_secs,
        },
        RepoError::Unavailable { path } => KilnError::RepositoryNotFound { path },
        RepoError::Io { package, source } => {
            KilnError::Io(std::io::Error::other(format!(
                "install failed for '{package}': {source}"
            )))
        }
    }
}
