//! Inspect command

use std::path::PathBuf;

use anyhow::Result;
use serde_json::json;

use kiln::application::QueryUseCase;
use kiln::config::ColorMode;
use kiln::domain::entities::ImageManifest;
use kiln::domain::value_objects::ImageRef;
use kiln::infrastructure::repositories::TomlIndexRepository;

use crate::commands::definition::{config_for_ui, resolve_store};
use crate::ui::context::UiContext;
use crate::ui::json;
use crate::ui::views::inspect::render_manifest;

pub fn cmd_inspect(
    reference: String,
    files: bool,
    store: Option<PathBuf>,
    json: bool,
    verbose: u8,
    color: Option<ColorMode>,
) -> Result<()> {
    let ui = UiContext::new(json, verbose, color, &config_for_ui());
    let store_root = resolve_store(store.as_deref());

    let image = ImageRef::parse(&reference)?;
    let manifest = QueryUseCase::new(TomlIndexRepository::new()).inspect(&store_root, &image)?;

    if ui.json {
        json::emit(manifest_json(&manifest, files))?;
    } else {
        print!("{}", render_manifest(&manifest, files, ui.color, ui.unicode));
    }

    Ok(())
}

fn manifest_json(manifest: &ImageManifest, files: bool) -> serde_json::Value {
    let mut event = json!({
        "event": "manifest",
        "reference": manifest.reference(),
        "name": manifest.name,
        "tag": manifest.tag,
        "digest": manifest.digest.as_str(),
        "created_at": manifest.created_at.to_rfc3339(),
        "port": manifest.exposed_port,
        "entrypoint": manifest.entrypoint,
        "command": manifest.command.display_line(),
        "env": manifest.env,
        "packages": manifest.packages,
        "system_packages": manifest.system_packages,
        "file_count": manifest.file_count(),
    });
    if files {
        let listed: serde_json::Map<String, serde_json::Value> = manifest
            .files
            .iter()
            .map(|(path, digest)| (path.clone(), json!(digest.as_str())))
            .collect();
        event["files"] = serde_json::Value::Object(listed);
    }
    event
}
