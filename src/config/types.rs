//! Configuration type definitions
//!
//! The build definition (`kiln.toml`) plus tool presentation preferences.
//! Every section is optional in the file; defaults reproduce the canonical
//! single-service layout (entry point `main.py`, port 8000, uvicorn-style
//! startup command).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::CommandSpec;
use crate::error::{KilnError, KilnResult};
use crate::domain::value_objects::is_valid_name;

use super::loader::{self, ConfigWarning};

/// Image identity section
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ImageConfig {
    #[serde(default)]
    pub name: String,

    #[serde(default = "default_tag")]
    pub tag: String,
}

fn default_tag() -> String {
    "latest".to_string()
}

/// Base layout section
///
/// When set, the directory is copied as the clean skeleton of the runtime
/// stage. A `.kilnignore` file inside it filters what gets copied.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BaseConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Builder stage section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuilderConfig {
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    /// Deadline for the whole dependency install phase
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub repository: Option<PathBuf>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            timeout_secs: default_timeout_secs(),
            repository: None,
        }
    }
}

fn default_manifest() -> PathBuf {
    PathBuf::from("requirements.txt")
}

fn default_timeout_secs() -> u64 {
    120
}

/// Runtime stage section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Single top-level entry-point file copied into the rootfs
    #[serde(default = "default_entrypoint")]
    pub entrypoint: PathBuf,

    /// OS-level tools installed directly into the runtime stage
    #[serde(default)]
    pub system_packages: Vec<String>,

    /// Advisory exposed port; binding is done by the launched process
    #[serde(default = "default_port")]
    pub port: u16,

    /// Placeholder environment defaults (values stay empty until run time)
    #[serde(default)]
    pub env: BTreeMap<String, String>,

    #[serde(default)]
    pub command: Option<CommandConfig>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            entrypoint: default_entrypoint(),
            system_packages: Vec::new(),
            port: default_port(),
            env: BTreeMap::new(),
            command: None,
        }
    }
}

fn default_entrypoint() -> PathBuf {
    PathBuf::from("main.py")
}

fn default_port() -> u16 {
    8000
}

/// Fixed startup command override
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandConfig {
    pub program: String,

    #[serde(default)]
    pub args: Vec<String>,
}

/// Store section
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,

    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::default(),
            color: ColorMode::default(),
            unicode: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

/// Main configuration structure (the parsed `kiln.toml`)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub image: ImageConfig,

    #[serde(default)]
    pub base: BaseConfig,

    #[serde(default)]
    pub builder: BuilderConfig,

    #[serde(default)]
    pub runtime: RuntimeConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> KilnResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> KilnResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Apply environment variable overrides (KILN_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Validate the parts every command needs before doing work
    pub fn validate(&self) -> KilnResult<()> {
        if self.image.name.is_empty() || !is_valid_name(&self.image.name) {
            return Err(KilnError::InvalidImageName {
                name: self.image.name.clone(),
            });
        }
        if !is_valid_name(&self.image.tag) {
            return Err(KilnError::InvalidImageTag {
                tag: self.image.tag.clone(),
            });
        }
        Ok(())
    }

    /// Effective startup command
    ///
    /// When `[runtime.command]` is absent the canonical ASGI launch is
    /// derived from the entry point and exposed port: the server loads
    /// `<stem>:app` and binds all interfaces on the exposed port.
    pub fn effective_command(&self) -> CommandSpec {
        match &self.runtime.command {
            Some(command) => CommandSpec {
                program: command.program.clone(),
                args: command.args.clone(),
            },
            None => {
                let stem = self
                    .runtime
                    .entrypoint
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "main".to_string());
                CommandSpec {
                    program: "uvicorn".to_string(),
                    args: vec![
                        format!("{}:app", stem),
                        "--host".to_string(),
                        "0.0.0.0".to_string(),
                        "--port".to_string(),
                        self.runtime.port.to_string(),
                    ],
                }
            }
        }
    }

    /// `name:tag` this build definition produces
    pub fn reference(&self) -> String {
        format!("{}:{}", self.image.name, self.image.tag)
    }
}
