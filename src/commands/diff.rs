//! Diff command

use std::path::PathBuf;

use anyhow::Result;
use serde_json::json;

use kiln::application::{ImageDiff, QueryUseCase};
use kiln::config::ColorMode;
use kiln::domain::value_objects::ImageRef;
use kiln::infrastructure::repositories::TomlIndexRepository;

use crate::commands::definition::{config_for_ui, resolve_store};
use crate::ui::context::UiContext;
use crate::ui::json;
use crate::ui::views::diff::{render_diff_header, render_image_diff};

pub fn cmd_diff(
    left: String,
    right: String,
    store: Option<PathBuf>,
    json: bool,
    verbose: u8,
    color: Option<ColorMode>,
) -> Result<()> {
    let ui = UiContext::new(json, verbose, color, &config_for_ui());
    let store_root = resolve_store(store.as_deref());

    let left = ImageRef::parse(&left)?;
    let right = ImageRef::parse(&right)?;

    let diff = QueryUseCase::new(TomlIndexRepository::new()).diff(&store_root, &left, &right)?;

    if ui.json {
        json::emit(diff_json(&diff))?;
    } else {
        print!(
            "{}",
            render_diff_header(&diff.left, &diff.right, ui.color, ui.unicode)
        );
        println!();
        print!("{}", render_image_diff(&diff, ui.color, ui.unicode));
    }

    Ok(())
}

fn diff_json(diff: &ImageDiff) -> serde_json::Value {
    json!({
        "event": "diff",
        "left": diff.left,
        "right": diff.right,
        "identical": diff.is_identical(),
        "added": diff.added,
        "removed": diff.removed,
        "changed": diff.changed,
        "metadata_changed": diff.metadata.has_changes,
        "metadata_summary": diff.metadata.summary(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln::domain::services::Differ;

    #[test]
    fn diff_event_reports_deltas() {
        let diff = ImageDiff {
            left: "app:v1".to_string(),
            right: "app:v2".to_string(),
            added: vec!["lib/new.py".to_string()],
            removed: Vec::new(),
            changed: vec!["main.py".to_string()],
            metadata: Differ::new().diff("tag = \"v1\"\n", "tag = \"v2\"\n"),
        };
        let event = diff_json(&diff);
        assert_eq!(event["event"], "diff");
        assert_eq!(event["identical"], false);
        assert_eq!(event["added"][0], "lib/new.py");
        assert_eq!(event["metadata_changed"], true);
    }
}
