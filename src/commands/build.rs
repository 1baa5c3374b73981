//! Build command

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use serde_json::json;

use kiln::application::{BuildOptions, BuildUseCase};
use kiln::config::{resolve_repository_path, resolve_store_path, ColorMode, ConfigWarning};
use kiln::domain::ports::BuildEventSink;
use kiln::infrastructure::repositories::{DirRepository, TomlIndexRepository};

use crate::commands::definition::load_definition;
use crate::ui::context::UiContext;
use crate::ui::events::{ConsoleEventSink, JsonEventSink};
use crate::ui::json;
use crate::ui::primitives::icon::Icon;
use crate::ui::views::build::{render_build_footer, render_build_header};

#[allow(clippy::too_many_arguments)]
pub fn cmd_build(
    file: PathBuf,
    tag: Option<String>,
    store: Option<PathBuf>,
    repository: Option<PathBuf>,
    timeout_secs: Option<u64>,
    dry_run: bool,
    json: bool,
    verbose: u8,
    color: Option<ColorMode>,
) -> Result<()> {
    let def = load_definition(&file)?;
    let ui = UiContext::new(json, verbose, color, &def.config);

    let store_root = resolve_store_path(store.as_deref(), &def.config, &def.project_root);
    let repository_root =
        resolve_repository_path(repository.as_deref(), &def.config, &def.project_root);

    let reference = match tag.as_deref() {
        Some(tag) => format!("{}:{}", def.config.image.name, tag),
        None => def.config.reference(),
    };

    if ui.json {
        for warning in &def.warnings {
            json::emit(config_warning_json(warning))?;
        }
    } else {
        print!(
            "{}",
            render_build_header(&def.file, &reference, &store_root, dry_run, ui.color, ui.unicode)
        );
        for warning in &def.warnings {
            println!("{}", render_config_warning(warning, ui.color, ui.unicode));
        }
        println!();
    }

    let mut options = BuildOptions::new(&def.file, &store_root, &repository_root);
    if let Some(tag) = tag {
        options = options.with_tag(tag);
    }
    if let Some(secs) = timeout_secs {
        options = options.with_timeout_secs(secs);
    }
    options = options.with_dry_run(dry_run);

    let events: Arc<dyn BuildEventSink> = if ui.json {
        Arc::new(JsonEventSink)
    } else {
        Arc::new(ConsoleEventSink::new(&ui))
    };

    let use_case = BuildUseCase::new(
        DirRepository::new(repository_root.clone()),
        TomlIndexRepository::new(),
    );
    let result = use_case.execute_with_events(&def.config, &options, events)?;

    if !ui.json {
        print!("{}", render_build_footer(&result, ui.color, ui.unicode));
    }

    Ok(())
}

fn render_config_warning(warning: &ConfigWarning, color: bool, unicode: bool) -> String {
    let icon = Icon::Warning.colored(color, unicode);
    let location = match warning.line {
        Some(line) => format!("{}:{}", warning.file.display(), line),
        None => warning.file.display().to_string(),
    };
    let mut out = format!("{} unknown key `{}` in {}", icon, warning.key, location);
    if let Some(suggestion) = &warning.suggestion {
        out.push_str(&format!(" (did you mean `{}`?)", suggestion));
    }
    out
}

fn config_warning_json(warning: &ConfigWarning) -> serde_json::Value {
    json!({
        "event": "config_warning",
        "key": warning.key,
        "file": warning.file.display().to_string(),
        "line": warning.line,
        "suggestion": warning.suggestion,
    })
}
