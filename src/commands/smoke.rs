//! Smoke command

use std::path::PathBuf;

use anyhow::Result;
use serde_json::json;

use kiln::application::{parse_env_assignments, QueryUseCase, RunUseCase, SmokeOptions, SmokeOutcome};
use kiln::config::ColorMode;
use kiln::domain::value_objects::ImageRef;
use kiln::infrastructure::repositories::TomlIndexRepository;

use crate::commands::definition::{config_for_ui, resolve_store};
use crate::ui::context::UiContext;
use crate::ui::json;
use crate::ui::views::run::{render_smoke_header, render_smoke_report};

#[allow(clippy::too_many_arguments)]
pub fn cmd_smoke(
    reference: String,
    timeout_secs: u64,
    env: Vec<String>,
    port: Option<u16>,
    store: Option<PathBuf>,
    json: bool,
    verbose: u8,
    color: Option<ColorMode>,
) -> Result<()> {
    let ui = UiContext::new(json, verbose, color, &config_for_ui());
    let store_root = resolve_store(store.as_deref());

    let image = ImageRef::parse(&reference)?;
    let env = parse_env_assignments(&env)?;

    let manifest = QueryUseCase::new(TomlIndexRepository::new()).inspect(&store_root, &image)?;
    let probe_port = port.unwrap_or(manifest.exposed_port);

    if !ui.json {
        print!(
            "{}",
            render_smoke_header(
                &image.to_string(),
                probe_port,
                timeout_secs,
                ui.color,
                ui.unicode,
            )
        );
        println!();
    }

    let mut options = SmokeOptions::new(&store_root)
        .with_env(env)
        .with_timeout_secs(timeout_secs);
    if let Some(port) = port {
        options = options.with_port(port);
    }

    let report = RunUseCase::new().smoke(&image, &options)?;

    if ui.json {
        json::emit(smoke_report_json(&report))?;
    } else {
        print!("{}", render_smoke_report(&report, ui.color, ui.unicode));
    }

    // Ready exits zero; anything else is a failed smoke.
    std::process::exit(if report.is_ready() { 0 } else { 1 });
}

fn smoke_report_json(report: &kiln::application::SmokeReport) -> serde_json::Value {
    match &report.outcome {
        SmokeOutcome::Ready { elapsed_ms } => json!({
            "event": "smoke_ready",
            "reference": report.reference,
            "port": report.port,
            "elapsed_ms": elapsed_ms,
        }),
        SmokeOutcome::TimedOut { secs } => json!({
            "event": "smoke_timeout",
            "reference": report.reference,
            "port": report.port,
            "timeout_secs": secs,
        }),
        SmokeOutcome::ProcessExited { exit_code } => json!({
            "event": "smoke_process_exited",
            "reference": report.reference,
            "port": report.port,
            "exit_code": exit_code,
        }),
    }
}
