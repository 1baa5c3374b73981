//! Build command UI views

use std::path::Path;

use kiln::application::BuildResult;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Render the build command header
pub fn render_build_header(
    file: &Path,
    reference: &str,
    store: &Path,
    dry_run: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let title = if dry_run {
        "kiln build (dry run)"
    } else {
        "kiln build"
    };
    let mut header = CommandHeader::new(Icon::Build, title);
    header.add("Definition", file.display().to_string());
    header.add("Image", reference);
    header.add("Store", store.display().to_string());
    header.render(supports_color, supports_unicode)
}

/// Render the post-build footer: warnings recap and the next step
pub fn render_build_footer(
    result: &BuildResult,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = String::new();

    if result.has_warnings() {
        let icon = Icon::Warning.colored(supports_color, supports_unicode);
        out.push_str(&format!("\n{} {} warning(s):\n", icon, result.warnings.len()));
        for warning in &result.warnings {
            out.push_str(&format!("  {}\n", warning));
        }
    }

    if !result.dry_run {
        let arrow = Icon::Arrow.colored(supports_color, supports_unicode);
        let hint = format!("Next: kiln run {}", result.reference);
        out.push('\n');
        out.push_str(&format!(
            "{} {}\n",
            arrow,
            ColoredText::dim(hint).render(supports_color)
        ));
    }

    out
}
