//! Push command UI views

use kiln::application::PushResult;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::events::format_duration_ms;
use crate::ui::primitives::icon::Icon;

/// Render the push command header
pub fn render_push_header(
    reference: &str,
    destination: &str,
    method: Option<&str>,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Push, "kiln push");
    header.add("Image", reference);
    header.add("Destination", destination);
    if let Some(method) = method {
        header.add("Via", method);
    }
    header.render(supports_color, supports_unicode)
}

/// Render the push success line
pub fn render_push_result(
    result: &PushResult,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    format!(
        "{} Pushed {} to {}:{} via {} in {}\n",
        Icon::Success.colored(supports_color, supports_unicode),
        result.reference,
        result.destination.host,
        result.destination.path,
        result.method,
        format_duration_ms(result.duration_ms)
    )
}
