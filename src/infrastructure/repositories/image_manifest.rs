//! Image manifest codec
//!
//! Reads and writes `manifest.toml` inside an image directory. The version
//! field is probed before the full parse so a manifest written by a newer
//! kiln reports a version mismatch instead of a confusing decode error.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{CommandSpec, ImageManifest, MANIFEST_FORMAT_VERSION};
use crate::domain::value_objects::Digest;
use crate::error::{KilnError, KilnResult};
use crate::infrastructure::fs::write_atomic;
use crate::infrastructure::repositories::store;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlCommand {
    program: String,
    #[serde(default)]
    args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlImageManifest {
    version: u32,
    name: String,
    tag: String,
    digest: String,
    created_at: DateTime<Utc>,
    exposed_port: u16,
    entrypoint: String,
    #[serde(default)]
    env: BTreeMap<String, String>,
    command: TomlCommand,
    #[serde(default)]
    packages: BTreeMap<String, String>,
    #[serde(default)]
    system_packages: BTreeMap<String, String>,
    #[serde(default)]
    files: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct VersionProbe {
    #[serde(default)]
    version: u32,
}

/// Load the manifest from an image directory.
pub fn load_image_manifest(image_dir: &Path) -> KilnResult<ImageManifest> {
    let path = store::manifest_path(image_dir);
    if !path.exists() {
        return Err(KilnError::StoreCorrupted {
            path: image_dir.to_path_buf(),
            message: format!("missing {}", store::MANIFEST_FILE),
        });
    }

    let content = fs::read_to_string(&path)?;

    let probe: VersionProbe =
        toml::from_str(&content).map_err(|err| KilnError::StoreCorrupted {
            path: path.clone(),
            message: err.to_string(),
        })?;
    if probe.version != MANIFEST_FORMAT_VERSION {
        return Err(KilnError::UnsupportedManifestVersion {
            found: probe.version,
            supported: MANIFEST_FORMAT_VERSION,
        });
    }

    let parsed: TomlImageManifest =
        toml::from_str(&content).map_err(|err| KilnError::StoreCorrupted {
            path,
            message: err.to_string(),
        })?;

    Ok(from_toml(parsed))
}

/// Write the manifest into an image directory atomically.
pub fn save_image_manifest(image_dir: &Path, manifest: &ImageManifest) -> KilnResult<()> {
    let content = toml::to_string_pretty(&to_toml(manifest))
        .map_err(|err| KilnError::Io(std::io::Error::other(err)))?;
    write_atomic(&store::manifest_path(image_dir), &content)
}

fn from_toml(manifest: TomlImageManifest) -> ImageManifest {
    ImageManifest {
        version: manifest.version,
        name: manifest.name,
        tag: manifest.tag,
        digest: Digest::from(manifest.digest),
        created_at: manifest.created_at,
        exposed_port: manifest.exposed_port,
        entrypoint: manifest.entrypoint,
        env: manifest.env,
        command: CommandSpec {
            program: manifest.command.program,
            args: manifest.command.args,
        },
        packages: manifest.packages,
        system_packages: manifest.system_packages,
        files: manifest
            .files
            .into_iter()
            .map(|(path, digest)| (path, Digest::from(digest)))
            .collect(),
    }
}

fn to_toml(manifest: &ImageManifest) -> TomlImageManifest {
    TomlImageManifest {
        version: manifest.version,
        name: manifest.name.clone(),
        tag: manifest.tag.clone(),
        digest: manifest.digest.to_string(),
        created_at: manifest.created_at,
        exposed_port: manifest.exposed_port,
        entrypoint: manifest.entrypoint.clone(),
        env: manifest.env.clone(),
        command: TomlCommand {
            program: manifest.command.program.clone(),
            args: manifest.command.args.clone(),
        },
        packages: manifest.packages.clone(),
        system_packages: manifest.system_packages.clone(),
        files: manifest
            .files
            .iter()
            .map(|(path, digest)| (path.clone(), digest.to_string()))
            .collect(),
    }
}
