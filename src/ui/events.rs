//! Build event sinks for the two output modes.
//!
//! `ConsoleEventSink` renders progress lines for humans; `JsonEventSink`
//! streams one NDJSON object per event for CI. Both implement the build
//! event port, so the use case never knows which mode it is driving.

use kiln::domain::ports::{BuildEvent, BuildEventSink};

use crate::ui::context::UiContext;
use crate::ui::json;
use crate::ui::primitives::icon::Icon;

/// Renders build progress as human-readable lines.
pub struct ConsoleEventSink {
    color: bool,
    unicode: bool,
    verbose: u8,
}

impl ConsoleEventSink {
    pub fn new(ui: &UiContext) -> Self {
        Self {
            color: ui.color,
            unicode: ui.unicode,
            verbose: ui.verbose,
        }
    }

    fn icon(&self, icon: Icon) -> String {
        icon.colored(self.color, self.unicode)
    }
}

impl BuildEventSink for ConsoleEventSink {
    fn on_event(&self, event: BuildEvent) {
        match event {
            // The command header already names the definition and image.
            BuildEvent::Started { .. } => {}
            BuildEvent::StageStarted { stage } => {
                println!("{} {} stage", self.icon(Icon::Arrow), stage);
            }
            BuildEvent::PackageResolved { name, version } => {
                println!("  {} {} -> {}", self.icon(Icon::Pending), name, version);
            }
            BuildEvent::PackageInstalled {
                name,
                version,
                files,
                ..
            } => {
                println!(
                    "  {} {} {} ({} files)",
                    self.icon(Icon::Success),
                    name,
                    version,
                    files
                );
            }
            BuildEvent::EntryPointCopied { path } => {
                println!("  {} entry point {}", self.icon(Icon::Success), path);
            }
            BuildEvent::StageCompleted { stage, files } => {
                if self.verbose > 0 {
                    println!(
                        "  {} {} stage complete ({} files)",
                        self.icon(Icon::Success),
                        stage,
                        files
                    );
                }
            }
            BuildEvent::Warning { message } => {
                println!("{} {}", self.icon(Icon::Warning), message);
            }
            BuildEvent::Completed {
                reference,
                digest,
                files,
                duration_ms,
                dry_run,
            } => {
                if dry_run {
                    println!(
                        "{} {} resolves cleanly (dry run, nothing promoted)",
                        self.icon(Icon::Success),
                        reference
                    );
                } else {
                    println!(
                        "{} Built {} ({} files, {}, {})",
                        self.icon(Icon::Success),
                        reference,
                        files,
                        short_digest(&digest),
                        format_duration_ms(duration_ms)
                    );
                }
            }
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.verbose > 0
    }
}

/// Streams build events as NDJSON for `--json` mode.
pub struct JsonEventSink;

impl BuildEventSink for JsonEventSink {
    fn on_event(&self, event: BuildEvent) {
        let _ = json::emit(build_event_json(&event));
    }
}

/// NDJSON encoding of one build event.
pub fn build_event_json(event: &BuildEvent) -> serde_json::Value {
    match event {
        BuildEvent::Started {
            file,
            reference,
            dry_run,
        } => serde_json::json!({
            "event": "build_started",
            "definition": file.display().to_string(),
            "reference": reference,
            "dry_run": dry_run,
        }),
        BuildEvent::StageStarted { stage } => serde_json::json!({
            "event": "stage_started",
            "stage": stage.to_string(),
        }),
        BuildEvent::PackageResolved { name, version } => serde_json::json!({
            "event": "package_resolved",
            "name": name,
            "version": version,
        }),
        BuildEvent::PackageInstalled {
            stage,
            name,
            version,
            files,
        } => serde_json::json!({
            "event": "package_installed",
            "stage": stage.to_string(),
            "name": name,
            "version": version,
            "files": files,
        }),
        BuildEvent::EntryPointCopied { path } => serde_json::json!({
            "event": "entry_point_copied",
            "path": path,
        }),
        BuildEvent::StageCompleted { stage, files } => serde_json::json!({
            "event": "stage_completed",
            "stage": stage.to_string(),
            "files": files,
        }),
        BuildEvent::Warning { message } => serde_json::json!({
            "event": "warning",
            "message": message,
        }),
        BuildEvent::Completed {
            reference,
            digest,
            files,
            duration_ms,
            dry_run,
        } => serde_json::json!({
            "event": "build_completed",
            "reference": reference,
            "digest": digest,
            "files": files,
            "duration_ms": duration_ms,
            "dry_run": dry_run,
        }),
    }
}

/// First 12 hex characters after the algorithm prefix.
pub fn short_digest(digest: &str) -> String {
    let hex = digest.strip_prefix("sha256:").unwrap_or(digest);
    let short: String = hex.chars().take(12).collect();
    format!("sha256:{}", short)
}

pub fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        return format!("{}ms", ms);
    }
    format!("{:.1}s", ms as f64 / 1000.0)
}
