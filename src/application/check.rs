//! Check Use Case
//!
//! Preflight validation of a build definition: everything `kiln build` would
//! reject, surfaced as findings instead of a first-failure abort, plus
//! advisory warnings (baked-in secrets, port/command drift, unknown config
//! keys). Read-only; the store is never touched.

use std::path::{Path, PathBuf};

use crate::config::{Config, ConfigWarning};
use crate::domain::ports::{PackageRepository, RepoError};
use crate::domain::services::preflight::{self, CheckFinding, Severity};
use crate::domain::services::resolver;
use crate::domain::value_objects::Requirement;
use crate::error::{KilnError, KilnResult};
use crate::infrastructure::fs::ensure_within;
use crate::manifest::parse_manifest_file;

/// Options for the check use case
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// The build definition file (for finding locations)
    pub file: PathBuf,
    /// Project root; manifest and entry point resolve against it
    pub project_root: PathBuf,
    /// Package repository root
    pub repository: PathBuf,
    /// Treat warnings as errors when deciding the exit status
    pub strict_warnings: bool,
}

impl CheckOptions {
    pub fn new(file: impl Into<PathBuf>, repository: impl Into<PathBuf>) -> Self {
        let file: PathBuf = file.into();
        let project_root = file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            file,
            project_root,
            repository: repository.into(),
            strict_warnings: false,
        }
    }

    pub fn with_strict_warnings(mut self, strict: bool) -> Self {
        self.strict_warnings = strict;
        self
    }
}

/// Everything the check observed
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub findings: Vec<CheckFinding>,
}

impl CheckReport {
    pub fn error_count(&self) -> usize {
        self.findings.iter().filter(|f| f.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .count()
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Whether the check should exit zero.
    pub fn passes(&self, strict_warnings: bool) -> bool {
        self.error_count() == 0 && (!strict_warnings || self.warning_count() == 0)
    }
}

/// Check use case - run every preflight rule and collect the findings
pub struct CheckUseCase<R>
where
    R: PackageRepository,
{
    packages: R,
}

impl<R> CheckUseCase<R>
where
    R: PackageRepository,
{
    pub fn new(packages: R) -> Self {
        Self { packages }
    }

    pub fn execute(
        &self,
        config: &Config,
        config_warnings: &[ConfigWarning],
        options: &CheckOptions,
    ) -> KilnResult<CheckReport> {
        let mut findings = Vec::new();

        for warning in config_warnings {
            findings.push(unknown_key_finding(warning));
        }

        findings.extend(preflight::check_identity(
            &config.image.name,
            &config.image.tag,
        ));
        findings.extend(preflight::check_port(config.runtime.port));
        findings.extend(preflight::check_command(
            &config.effective_command(),
            config.runtime.port,
        ));
        findings.extend(preflight::check_env_defaults(&config.runtime.env));

        let manifest_path = options.project_root.join(&config.builder.manifest);
        let mut requirements = Vec::new();
        match parse_manifest_file(&manifest_path) {
            Ok(parsed) => requirements = parsed,
            Err(KilnError::ManifestNotFound { path }) => {
                findings.push(CheckFinding::error(
                    "manifest",
                    format!("dependency manifest not found: {}", path.display()),
                ));
            }
            Err(KilnError::ManifestSyntax {
                file,
                line,
                message,
            }) => {
                findings.push(CheckFinding::error(
                    "manifest",
                    format!(
                        "invalid requirement in {}:{}: {}",
                        file.display(),
                        line,
                        message
                    ),
                ));
            }
            Err(err) => return Err(err),
        }

        // The repository only matters once something has to resolve against
        // it; a definition with no requirements builds without one.
        let needs_repository =
            !requirements.is_empty() || !config.runtime.system_packages.is_empty();
        let repository_present = options.repository.is_dir();
        if needs_repository && !repository_present {
            findings.push(
                CheckFinding::error(
                    "repository",
                    format!(
                        "package repository not found: {}",
                        options.repository.display()
                    ),
                )
                .with_recommendation("pass --repository or set [builder] repository"),
            );
        }

        if repository_present {
            for requirement in &requirements {
                self.check_resolvable(requirement, "packages", &mut findings);
            }
        }

        for entry in &config.runtime.system_packages {
            match Requirement::parse(entry) {
                Ok(requirement) => {
                    if repository_present {
                        self.check_resolvable(&requirement, "system", &mut findings);
                    }
                }
                Err(message) => {
                    findings.push(CheckFinding::error(
                        "system",
                        format!("invalid system package '{}': {}", entry, message),
                    ));
                }
            }
        }

        self.check_entrypoint(config, options, &mut findings)?;

        Ok(CheckReport { findings })
    }

    fn check_resolvable(
        &self,
        requirement: &Requirement,
        section: &str,
        findings: &mut Vec<CheckFinding>,
    ) {
        match self.packages.available_versions(&requirement.name) {
            Ok(available) => {
                if resolver::best_match(requirement, &available).is_none() {
                    findings.push(CheckFinding::error(
                        section,
                        format!(
                            "no version of '{}' satisfies '{}' (available: {})",
                            requirement.name,
                            requirement.constraint,
                            resolver::format_available(&available)
                        ),
                    ));
                }
            }
            Err(RepoError::UnknownPackage { name }) => {
                findings.push(CheckFinding::error(
                    section,
                    format!("unknown package '{}'", name),
                ));
            }
            Err(err) => {
                findings.push(CheckFinding::error(section, err.to_string()));
            }
        }
    }

    fn check_entrypoint(
        &self,
        config: &Config,
        options: &CheckOptions,
        findings: &mut Vec<CheckFinding>,
    ) -> KilnResult<()> {
        let path = options.project_root.join(&config.runtime.entrypoint);
        if !path.is_file() {
            findings.push(CheckFinding::error(
                "runtime",
                format!("entry point not found: {}", path.display()),
            ));
            return Ok(());
        }
        match ensure_within(&options.project_root, &path) {
            Ok(_) => Ok(()),
            Err(KilnError::PathEscape { path, root }) => {
                findings.push(CheckFinding::error(
                    "runtime",
                    format!(
                        "entry point '{}' escapes the project root '{}'",
                        path.display(),
                        root.display()
                    ),
                ));
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

fn unknown_key_finding(warning: &ConfigWarning) -> CheckFinding {
    let location = match warning.line {
        Some(line) => format!("{}:{}", warning.file.display(), line),
        None => warning.file.display().to_string(),
    };
    let finding = CheckFinding::warning(
        "config",
        format!("unknown key '{}' in {}", warning.key, location),
    );
    match &warning.suggestion {
        Some(suggestion) => finding.with_recommendation(format!("did you mean '{}'?", suggestion)),
        None => finding,
    }
}
