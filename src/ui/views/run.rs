//! Run and smoke command UI views

use kiln::application::{SmokeOutcome, SmokeReport};

use crate::ui::blocks::header::CommandHeader;
use crate::ui::events::format_duration_ms;
use crate::ui::primitives::icon::Icon;

/// Render the run command header
pub fn render_run_header(
    reference: &str,
    command_line: &str,
    port: u16,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Run, "kiln run");
    header.add("Image", reference);
    header.add("Command", command_line);
    header.add("Port", port.to_string());
    header.render(supports_color, supports_unicode)
}

/// Render the smoke command header
pub fn render_smoke_header(
    reference: &str,
    port: u16,
    timeout_secs: u64,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Smoke, "kiln smoke");
    header.add("Image", reference);
    header.add("Port", port.to_string());
    header.add("Window", format!("{}s", timeout_secs));
    header.render(supports_color, supports_unicode)
}

/// Render the smoke outcome line
pub fn render_smoke_report(
    report: &SmokeReport,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    match &report.outcome {
        SmokeOutcome::Ready { elapsed_ms } => format!(
            "{} {} ready on port {} in {}\n",
            Icon::Success.colored(supports_color, supports_unicode),
            report.reference,
            report.port,
            format_duration_ms(*elapsed_ms)
        ),
        SmokeOutcome::TimedOut { secs } => format!(
            "{} port {} did not accept a connection within {}s\n",
            Icon::Error.colored(supports_color, supports_unicode),
            report.port,
            secs
        ),
        SmokeOutcome::ProcessExited { exit_code } => format!(
            "{} process exited with code {} before port {} accepted\n",
            Icon::Error.colored(supports_color, supports_unicode),
            exit_code,
            report.port
        ),
    }
}
