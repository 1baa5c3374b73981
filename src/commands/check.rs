//! Check command

use std::path::PathBuf;

use anyhow::Result;
use serde_json::json;

use kiln::application::{CheckOptions, CheckReport, CheckUseCase};
use kiln::config::{resolve_repository_path, ColorMode};
use kiln::domain::services::preflight::{CheckFinding, Severity};
use kiln::infrastructure::repositories::DirRepository;

use crate::commands::definition::load_definition;
use crate::ui::ci::{github_actions_annotation, AnnotationLevel};
use crate::ui::context::UiContext;
use crate::ui::json;
use crate::ui::terminal::is_github_actions;
use crate::ui::views::check::{render_check_findings, render_check_header, render_check_summary};

pub fn cmd_check(
    file: PathBuf,
    repository: Option<PathBuf>,
    strict_warnings: bool,
    json: bool,
    verbose: u8,
    color: Option<ColorMode>,
) -> Result<()> {
    let def = load_definition(&file)?;
    let ui = UiContext::new(json, verbose, color, &def.config);

    let repository_root =
        resolve_repository_path(repository.as_deref(), &def.config, &def.project_root);

    if !ui.json {
        print!(
            "{}",
            render_check_header(&def.file, strict_warnings, ui.color, ui.unicode)
        );
        println!();
    }

    let options =
        CheckOptions::new(&def.file, &repository_root).with_strict_warnings(strict_warnings);
    let report = CheckUseCase::new(DirRepository::new(repository_root.clone()))
        .execute(&def.config, &def.warnings, &options)?;
    let passed = report.passes(strict_warnings);

    if ui.json {
        for finding in &report.findings {
            json::emit(finding_json(finding))?;
        }
        json::emit(report_json(&report, strict_warnings))?;
    } else {
        print!("{}", render_check_findings(&report.findings, ui.color, ui.unicode));
        if !report.is_clean() {
            println!();
        }
        print!(
            "{}",
            render_check_summary(&report, strict_warnings, ui.color, ui.unicode)
        );
    }

    if !ui.json && is_github_actions() {
        let file = def.file.display().to_string();
        for finding in &report.findings {
            let level = match finding.severity {
                Severity::Warning => AnnotationLevel::Warning,
                Severity::Error => AnnotationLevel::Error,
            };
            println!(
                "{}",
                github_actions_annotation(
                    level,
                    &finding.message,
                    Some(&file),
                    Some(&finding.section),
                )
            );
        }
    }

    if !passed {
        std::process::exit(1);
    }

    Ok(())
}

fn finding_json(finding: &CheckFinding) -> serde_json::Value {
    let severity = match finding.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };
    json!({
        "event": "finding",
        "severity": severity,
        "section": finding.section,
        "message": finding.message,
        "recommendation": finding.recommendation,
    })
}

fn report_json(report: &CheckReport, strict_warnings: bool) -> serde_json::Value {
    json!({
        "event": "check_completed",
        "errors": report.error_count(),
        "warnings": report.warning_count(),
        "strict_warnings": strict_warnings,
        "passed": report.passes(strict_warnings),
    })
}
