//! Configuration module for kiln
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (KILN_*)
//! 3. Build definition (kiln.toml)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    default_store_path, load_with_warnings, resolve_repository_path, resolve_store_path,
    with_env_overrides, ConfigWarning, DEFAULT_CONFIG_FILE,
};
pub use types::{
    BaseConfig, BuilderConfig, ColorMode, CommandConfig, Config, ImageConfig, OutputConfig,
    RuntimeConfig, StoreConfig, Verbosity,
};
