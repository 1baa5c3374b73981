//! Test environment builder for isolated kiln testing.
//!
//! Provides `TestEnv` - an isolated environment with temp directories for
//! the project, the image store and HOME, plus helpers to run the kiln CLI.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Result of running a kiln CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Check if command succeeded
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse every stdout line as an NDJSON event
    pub fn json_events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .unwrap_or_else(|e| panic!("invalid NDJSON line '{}': {}", line, e))
            })
            .collect()
    }
}

/// Isolated test environment with temp directories.
///
/// Provides:
/// - Isolated project directory (definition, manifest, package repository)
/// - Isolated image store (via `KILN_STORE_PATH`)
/// - Isolated HOME so no real `~/.kiln` is ever touched
/// - CLI command execution helpers
pub struct TestEnv {
    /// Temporary directory for the project
    pub project_root: TempDir,
    /// Temporary directory for the image store
    pub store_root: TempDir,
    /// Temporary directory for HOME
    pub home_dir: TempDir,
    /// Path to the kiln binary
    kiln_bin: PathBuf,
}

impl TestEnv {
    /// Create a new TestEnvBuilder
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Get path relative to the store root
    pub fn store_path(&self, relative: &str) -> PathBuf {
        self.store_root.path().join(relative)
    }

    /// Directory of one stored image (`images/<name>/<tag>`)
    pub fn image_dir(&self, name: &str, tag: &str) -> PathBuf {
        self.store_path(&format!("images/{}/{}", name, tag))
    }

    /// Run kiln in this environment from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_from(self.project_root.path(), args)
    }

    /// Run kiln from the project root with extra env vars
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        self.run_from_with_env(self.project_root.path(), args, env_vars)
    }

    /// Run kiln from a specific directory
    pub fn run_from(&self, cwd: &Path, args: &[&str]) -> TestResult {
        self.run_from_with_env(cwd, args, &[])
    }

    /// Run kiln from a specific directory with extra env vars
    pub fn run_from_with_env(
        &self,
        cwd: &Path,
        args: &[&str],
        env_vars: &[(&str, &str)],
    ) -> TestResult {
        let mut cmd = Command::new(&self.kiln_bin);
        cmd.current_dir(cwd)
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("KILN_STORE_PATH", self.store_root.path())
            // Deterministic output: ASCII icons, no color, no CI detection.
            .env("TERM", "dumb")
            .env("NO_COLOR", "1")
            .env_remove("KILN_REPOSITORY_PATH")
            .env_remove("KILN_COLOR")
            .env_remove("KILN_VERBOSITY")
            .env_remove("GITHUB_ACTIONS")
            .env_remove("CI");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute kiln");
        self.output_to_result(output)
    }

    /// Convert Command output to TestResult
    fn output_to_result(&self, output: Output) -> TestResult {
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Write a file to the project directory
    pub fn write_project_file(&self, relative_path: &str, content: &str) {
        let full_path = self.project_path(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    /// Remove a file from the project directory
    pub fn remove_project_file(&self, relative_path: &str) {
        let full_path = self.project_path(relative_path);
        if full_path.exists() {
            std::fs::remove_file(&full_path).expect("Failed to remove file");
        }
    }

    /// Seed one package version into the project's `packages/` repository
    pub fn write_package(&self, name: &str, version: &str, files: &[(&str, &str)]) {
        let version_dir = self.project_path(&format!("packages/{}/{}", name, version));
        std::fs::create_dir_all(&version_dir).expect("Failed to create package directory");
        for (relative, content) in files {
            let path = version_dir.join(relative);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).expect("Failed to create package subdirectory");
            }
            std::fs::write(&path, content).expect("Failed to write package file");
        }
    }

    /// Read a stored image's manifest
    pub fn read_manifest(&self, name: &str, tag: &str) -> String {
        let path = self.image_dir(name, tag).join("manifest.toml");
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read manifest {}: {}", path.display(), e))
    }
}

/// Builder for TestEnv with fluent API
pub struct TestEnvBuilder {
    definition: Option<String>,
    project_files: Vec<(String, String)>,
    packages: Vec<(String, String, Vec<(String, String)>)>,
}

impl TestEnvBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            definition: None,
            project_files: Vec::new(),
            packages: Vec::new(),
        }
    }

    /// Set the `kiln.toml` content for the project
    pub fn with_definition(mut self, toml: &str) -> Self {
        self.definition = Some(toml.to_string());
        self
    }

    /// Add a file to the project directory
    pub fn with_project_file(mut self, path: &str, content: &str) -> Self {
        self.project_files
            .push((path.to_string(), content.to_string()));
        self
    }

    /// Seed a package version into the project's `packages/` repository.
    ///
    /// File paths are relative to the version directory, so payloads land
    /// under `lib/` or `bin/`.
    pub fn with_package(mut self, name: &str, version: &str, files: &[(&str, &str)]) -> Self {
        self.packages.push((
            name.to_string(),
            version.to_string(),
            files
                .iter()
                .map(|(p, c)| (p.to_string(), c.to_string()))
                .collect(),
        ));
        self
    }

    /// Build the TestEnv
    pub fn build(self) -> TestEnv {
        let project_root = TempDir::new().expect("Failed to create project temp dir");
        let store_root = TempDir::new().expect("Failed to create store temp dir");
        let home_dir = TempDir::new().expect("Failed to create home temp dir");

        let kiln_bin = PathBuf::from(env!("CARGO_BIN_EXE_kiln"));

        if let Some(definition) = &self.definition {
            std::fs::write(project_root.path().join("kiln.toml"), definition)
                .expect("Failed to write kiln.toml");
        }

        for (path, content) in &self.project_files {
            let full_path = project_root.path().join(path);
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent).expect("Failed to create project subdirectory");
            }
            std::fs::write(&full_path, content).expect("Failed to write project file");
        }

        for (name, version, files) in &self.packages {
            let version_dir = project_root
                .path()
                .join("packages")
                .join(name)
                .join(version);
            std::fs::create_dir_all(&version_dir).expect("Failed to create package directory");
            for (relative, content) in files {
                let path = version_dir.join(relative);
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)
                        .expect("Failed to create package subdirectory");
                }
                std::fs::write(&path, content).expect("Failed to write package file");
            }
        }

        TestEnv {
            project_root,
            store_root,
            home_dir,
            kiln_bin,
        }
    }
}

impl Default for TestEnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}
