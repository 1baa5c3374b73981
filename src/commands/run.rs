//! Run command

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use serde_json::json;

use kiln::application::{parse_env_assignments, QueryUseCase, RunOptions, RunUseCase};
use kiln::config::ColorMode;
use kiln::domain::value_objects::ImageRef;
use kiln::infrastructure::repositories::TomlIndexRepository;

use crate::commands::definition::{config_for_ui, resolve_store};
use crate::ui::context::UiContext;
use crate::ui::events::format_duration_ms;
use crate::ui::json;
use crate::ui::primitives::icon::Icon;
use crate::ui::views::run::render_run_header;

#[allow(clippy::too_many_arguments)]
pub fn cmd_run(
    reference: String,
    env: Vec<String>,
    wait_port: bool,
    wait_timeout_secs: u64,
    store: Option<PathBuf>,
    json: bool,
    verbose: u8,
    color: Option<ColorMode>,
) -> Result<()> {
    let ui = UiContext::new(json, verbose, color, &config_for_ui());
    let store_root = resolve_store(store.as_deref());

    let image = ImageRef::parse(&reference)?;
    let env = parse_env_assignments(&env)?;

    // The header needs the stored command and port before launch.
    let manifest = QueryUseCase::new(TomlIndexRepository::new()).inspect(&store_root, &image)?;

    if ui.json {
        json::emit(json!({
            "event": "run_started",
            "reference": image.to_string(),
            "command": manifest.command.display_line(),
            "port": manifest.exposed_port,
        }))?;
    } else {
        print!(
            "{}",
            render_run_header(
                &image.to_string(),
                &manifest.command.display_line(),
                manifest.exposed_port,
                ui.color,
                ui.unicode,
            )
        );
        println!();
    }

    let running = Arc::new(AtomicBool::new(true));
    let flag = running.clone();
    ctrlc::set_handler(move || {
        flag.store(false, Ordering::SeqCst);
    })?;

    let mut options = RunOptions::new(&store_root)
        .with_env(env)
        .with_wait_timeout_secs(wait_timeout_secs);
    if wait_port {
        options = options.with_wait_port();
    }

    let outcome = RunUseCase::new().run(&image, &options, running, |port, elapsed_ms| {
        if ui.json {
            let _ = json::emit(json!({
                "event": "port_ready",
                "port": port,
                "elapsed_ms": elapsed_ms,
            }));
        } else {
            println!(
                "{} port {} ready in {}",
                Icon::Success.colored(ui.color, ui.unicode),
                port,
                format_duration_ms(elapsed_ms)
            );
        }
    })?;

    if ui.json {
        json::emit(json!({
            "event": "run_exited",
            "reference": image.to_string(),
            "exit_code": outcome.exit_code,
            "interrupted": outcome.interrupted,
        }))?;
    } else if outcome.interrupted {
        println!(
            "{} interrupted, {} stopped",
            Icon::Warning.colored(ui.color, ui.unicode),
            image
        );
    } else {
        let icon = if outcome.exit_code == 0 {
            Icon::Success
        } else {
            Icon::Error
        };
        println!(
            "{} {} exited with code {}",
            icon.colored(ui.color, ui.unicode),
            image,
            outcome.exit_code
        );
    }

    // The service's exit code is the command's exit code.
    std::process::exit(outcome.exit_code);
}
