//! Push command

use std::path::PathBuf;

use anyhow::Result;
use serde_json::json;

use kiln::application::{PushOptions, PushResult, PushUseCase};
use kiln::config::ColorMode;
use kiln::domain::value_objects::ImageRef;
use kiln::infrastructure::transfer::detect_strategy;

use crate::commands::definition::{config_for_ui, resolve_store};
use crate::ui::context::UiContext;
use crate::ui::json;
use crate::ui::views::push::{render_push_header, render_push_result};

#[allow(clippy::too_many_arguments)]
pub fn cmd_push(
    reference: String,
    destination: String,
    timeout_secs: u64,
    store: Option<PathBuf>,
    json: bool,
    verbose: u8,
    color: Option<ColorMode>,
) -> Result<()> {
    let ui = UiContext::new(json, verbose, color, &config_for_ui());
    let store_root = resolve_store(store.as_deref());

    let image = ImageRef::parse(&reference)?;

    if !ui.json {
        let method = detect_strategy().map(|s| s.name());
        print!(
            "{}",
            render_push_header(
                &image.to_string(),
                &destination,
                method,
                ui.color,
                ui.unicode,
            )
        );
        println!();
    }

    let options = PushOptions::new(store_root)
        .with_timeout_secs(timeout_secs)
        .with_quiet(ui.json || ui.verbose == 0);

    let result = PushUseCase::new().execute(&image, &destination, &options)?;

    if ui.json {
        json::emit(push_result_json(&result))?;
    } else {
        print!("{}", render_push_result(&result, ui.color, ui.unicode));
    }

    Ok(())
}

fn push_result_json(result: &PushResult) -> serde_json::Value {
    json!({
        "event": "push_completed",
        "reference": result.reference,
        "host": result.destination.host,
        "path": result.destination.path,
        "method": result.method,
        "duration_ms": result.duration_ms,
    })
}
