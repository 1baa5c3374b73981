//! Images command

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use serde_json::json;

use kiln::application::QueryUseCase;
use kiln::config::ColorMode;
use kiln::domain::entities::IndexEntry;
use kiln::infrastructure::repositories::TomlIndexRepository;

use crate::commands::definition::{config_for_ui, resolve_store};
use crate::ui::context::UiContext;
use crate::ui::json;
use crate::ui::views::images::render_image_table;

pub fn cmd_images(
    store: Option<PathBuf>,
    json: bool,
    verbose: u8,
    color: Option<ColorMode>,
) -> Result<()> {
    let ui = UiContext::new(json, verbose, color, &config_for_ui());
    let store_root = resolve_store(store.as_deref());

    let entries = QueryUseCase::new(TomlIndexRepository::new()).images(&store_root)?;

    if ui.json {
        for entry in &entries {
            json::emit(image_entry_json(entry))?;
        }
    } else {
        print!("{}", render_image_table(&entries, Utc::now(), ui.color));
    }

    Ok(())
}

fn image_entry_json(entry: &IndexEntry) -> serde_json::Value {
    json!({
        "event": "image",
        "reference": entry.reference(),
        "name": entry.name,
        "tag": entry.tag,
        "digest": entry.digest.as_str(),
        "created_at": entry.created_at.to_rfc3339(),
        "file_count": entry.file_count,
    })
}
