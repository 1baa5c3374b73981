//! Clean command

use std::path::PathBuf;

use anyhow::{bail, Result};
use dialoguer::Confirm;
use serde_json::json;

use kiln::application::{CleanOptions, CleanResult, CleanUseCase};
use kiln::config::ColorMode;
use kiln::domain::value_objects::ImageRef;
use kiln::infrastructure::repositories::TomlIndexRepository;

use crate::commands::definition::{config_for_ui, resolve_store};
use crate::ui::context::UiContext;
use crate::ui::json;
use crate::ui::views::clean::{render_clean_header, render_clean_preview, render_clean_result};

#[allow(clippy::too_many_arguments)]
pub fn cmd_clean(
    reference: Option<String>,
    all: bool,
    yes: bool,
    dry_run: bool,
    store: Option<PathBuf>,
    json: bool,
    verbose: u8,
    color: Option<ColorMode>,
) -> Result<()> {
    let ui = UiContext::new(json, verbose, color, &config_for_ui());
    let store_root = resolve_store(store.as_deref());

    if reference.is_none() && !all {
        bail!("nothing selected - pass an image reference or --all");
    }

    let mut options = CleanOptions::new(&store_root)
        .with_all(all)
        .with_dry_run(dry_run);
    if let Some(reference) = &reference {
        options = options.with_image(ImageRef::parse(reference)?);
    }

    let use_case = CleanUseCase::new(TomlIndexRepository::new());

    // JSON mode never prompts; it behaves like --yes.
    if ui.json {
        let result = use_case.execute_confirmed(&options)?;
        json::emit(clean_result_json(&result))?;
        return Ok(());
    }

    print!(
        "{}",
        render_clean_header(&store_root, dry_run, ui.color, ui.unicode)
    );
    println!();

    let targets = use_case.preview(&options)?;
    if targets.is_empty() {
        println!("Nothing to remove.");
        return Ok(());
    }

    if dry_run {
        print!("{}", render_clean_preview(&targets, ui.color, ui.unicode));
        println!();
        let result = use_case.execute_confirmed(&options)?;
        print!("{}", render_clean_result(&result, ui.color, ui.unicode));
        return Ok(());
    }

    if !yes {
        print!("{}", render_clean_preview(&targets, ui.color, ui.unicode));
        println!();

        let confirmed = Confirm::new()
            .with_prompt(format!("Remove {} image(s)?", targets.len()))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let result = use_case.execute_confirmed(&options)?;
    print!("{}", render_clean_result(&result, ui.color, ui.unicode));

    Ok(())
}

fn clean_result_json(result: &CleanResult) -> serde_json::Value {
    json!({
        "event": "clean_completed",
        "removed": result.removed.iter().map(|e| e.reference()).collect::<Vec<_>>(),
        "removed_count": result.removed_count(),
        "file_count": result.file_count(),
        "dry_run": result.dry_run,
    })
}
