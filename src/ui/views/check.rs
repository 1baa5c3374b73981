//! Check command UI views

use std::path::Path;

use kiln::application::CheckReport;
use kiln::domain::services::preflight::{CheckFinding, Severity};

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Render the check command header
pub fn render_check_header(
    file: &Path,
    strict_warnings: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Check, "kiln check");
    header.add("Definition", file.display().to_string());
    if strict_warnings {
        header.add("Strict", "failing on warnings");
    }
    header.render(supports_color, supports_unicode)
}

/// Render the findings grouped by config section
pub fn render_check_findings(
    findings: &[CheckFinding],
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = String::new();

    let mut current_section: Option<&str> = None;
    for finding in findings {
        if current_section != Some(finding.section.as_str()) {
            if current_section.is_some() {
                out.push('\n');
            }
            out.push_str(&format!("[{}]\n", finding.section));
            current_section = Some(finding.section.as_str());
        }

        let icon = match finding.severity {
            Severity::Error => Icon::Error,
            Severity::Warning => Icon::Warning,
        };
        out.push_str(&format!(
            "  {} {}\n",
            icon.colored(supports_color, supports_unicode),
            finding.message
        ));
        if let Some(rec) = &finding.recommendation {
            out.push_str(&format!(
                "    {} {}\n",
                Icon::Arrow.colored(supports_color, supports_unicode),
                rec
            ));
        }
    }

    out
}

/// Render the check summary line
pub fn render_check_summary(
    report: &CheckReport,
    strict_warnings: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let errors = report.error_count();
    let warnings = report.warning_count();
    let passed = report.passes(strict_warnings);

    let (icon, text) = if report.is_clean() {
        (Icon::Success, ColoredText::success("Definition is clean"))
    } else if passed {
        (
            Icon::Warning,
            ColoredText::warning(format!("Passed with {} warning(s)", warnings)),
        )
    } else {
        (
            Icon::Error,
            ColoredText::error(format!(
                "Check failed ({} error(s), {} warning(s))",
                errors, warnings
            )),
        )
    };

    format!(
        "{} {}\n",
        icon.colored(supports_color, supports_unicode),
        text.render(supports_color)
    )
}
