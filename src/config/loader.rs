//! Configuration loading and path resolution

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{KilnError, KilnResult};

use super::types::{ColorMode, Config, Verbosity};

/// Conventional build definition file name
pub const DEFAULT_CONFIG_FILE: &str = "kiln.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> KilnResult<(Config, Vec<ConfigWarning>)> {
    if !path.exists() {
        return Err(KilnError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| KilnError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Apply environment variable overrides (KILN_* prefix)
pub fn with_env_overrides(mut config: Config) -> Config {
    // KILN_INSTALL_TIMEOUT_SECS
    if let Ok(raw) = std::env::var("KILN_INSTALL_TIMEOUT_SECS") {
        if let Ok(secs) = raw.parse::<u64>() {
            config.builder.timeout_secs = secs;
        }
    }

    // KILN_REPOSITORY_PATH
    if let Ok(path) = std::env::var("KILN_REPOSITORY_PATH") {
        if !path.is_empty() {
            config.builder.repository = Some(PathBuf::from(path));
        }
    }

    // KILN_STORE_PATH
    if let Ok(path) = std::env::var("KILN_STORE_PATH") {
        if !path.is_empty() {
            config.store.path = Some(PathBuf::from(path));
        }
    }

    // KILN_COLOR
    if let Ok(color) = std::env::var("KILN_COLOR") {
        config.output.color = match color.to_lowercase().as_str() {
            "always" => ColorMode::Always,
            "never" => ColorMode::Never,
            _ => ColorMode::Auto,
        };
    }

    // KILN_VERBOSITY
    if let Ok(verbosity) = std::env::var("KILN_VERBOSITY") {
        config.output.verbosity = match verbosity.to_lowercase().as_str() {
            "quiet" => Verbosity::Quiet,
            "verbose" => Verbosity::Verbose,
            _ => Verbosity::Normal,
        };
    }

    config
}

/// Resolve the image store root
///
/// Precedence: `--store` flag, then `KILN_STORE_PATH` (already folded into
/// the config by `with_env_overrides`), then `[store] path` relative to the
/// project, then `~/.kiln`.
pub fn resolve_store_path(flag: Option<&Path>, config: &Config, project_root: &Path) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    if let Some(path) = &config.store.path {
        return absolutize(path, project_root);
    }
    default_store_path()
}

/// Store root used when nothing else is configured
pub fn default_store_path() -> PathBuf {
    if let Ok(path) = std::env::var("KILN_STORE_PATH") {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".kiln")
}

/// Resolve the package repository root
///
/// Precedence: `--repository` flag, then `[builder] repository` (with
/// `KILN_REPOSITORY_PATH` folded in by `with_env_overrides`), then
/// `~/.kiln/packages`.
pub fn resolve_repository_path(
    flag: Option<&Path>,
    config: &Config,
    project_root: &Path,
) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    if let Some(path) = &config.builder.repository {
        return absolutize(path, project_root);
    }
    default_store_path().join("packages")
}

fn absolutize(path: &Path, project_root: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "image",
        "name",
        "tag",
        "base",
        "path",
        "builder",
        "manifest",
        "timeout_secs",
        "repository",
        "runtime",
        "entrypoint",
        "system_packages",
        "port",
        "env",
        "command",
        "program",
        "args",
        "store",
        "output",
        "verbosity",
        "color",
        "unicode",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
