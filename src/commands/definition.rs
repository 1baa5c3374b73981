use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use kiln::config::{
    load_with_warnings, resolve_store_path, with_env_overrides, Config, ConfigWarning,
    DEFAULT_CONFIG_FILE,
};

/// A build definition plus everything derived from its location.
#[derive(Debug)]
pub(crate) struct LoadedDefinition {
    pub config: Config,
    pub warnings: Vec<ConfigWarning>,
    pub file: PathBuf,
    pub project_root: PathBuf,
}

/// Load `file`, apply KILN_* overrides and derive the project root.
pub(crate) fn load_definition(file: &Path) -> Result<LoadedDefinition> {
    let (config, warnings) = load_with_warnings(file)
        .with_context(|| format!("failed to load {}", file.display()))?;
    let config = with_env_overrides(config);

    let project_root = file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(LoadedDefinition {
        config,
        warnings,
        file: file.to_path_buf(),
        project_root,
    })
}

/// Store root for commands that read the store without a definition.
///
/// The flag wins; otherwise a `kiln.toml` in the working directory may name
/// a store; otherwise the default (`KILN_STORE_PATH` or `~/.kiln`).
pub(crate) fn resolve_store(flag: Option<&Path>) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }

    let local = Path::new(DEFAULT_CONFIG_FILE);
    let config = match load_with_warnings(local) {
        Ok((config, _)) => with_env_overrides(config),
        Err(_) => Config::default(),
    };
    resolve_store_path(None, &config, Path::new("."))
}

/// Default config for UI decisions when no definition is required.
pub(crate) fn config_for_ui() -> Config {
    match load_with_warnings(Path::new(DEFAULT_CONFIG_FILE)) {
        Ok((config, _)) => config,
        Err(_) => Config::default(),
    }
}
