//! Clean command UI views

use std::path::Path;

use kiln::domain::entities::IndexEntry;
use kiln::application::CleanResult;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Render the clean command header
pub fn render_clean_header(
    store: &Path,
    dry_run: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let action = if dry_run {
        "kiln clean (dry run)"
    } else {
        "kiln clean"
    };
    let mut header = CommandHeader::new(Icon::Clean, action);
    header.add("Store", store.display().to_string());
    header.render(supports_color, supports_unicode)
}

/// Render the list of images a clean would remove
pub fn render_clean_preview(
    entries: &[IndexEntry],
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = String::new();
    if entries.is_empty() {
        out.push_str("Nothing to remove.\n");
        return out;
    }

    out.push_str(&format!("Would remove {} image(s):\n", entries.len()));
    for entry in entries {
        let icon = Icon::Pending.colored(supports_color, supports_unicode);
        out.push_str(&format!(
            "  {} {} ({}, {} files)\n",
            icon,
            entry.reference(),
            entry.digest.short(),
            entry.file_count
        ));
    }
    out
}

/// Render the final clean outcome
pub fn render_clean_result(
    result: &CleanResult,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = String::new();

    if result.is_empty() {
        out.push_str("Nothing to remove.\n");
        return out;
    }

    if result.dry_run {
        let line = format!(
            "Dry run: {} image(s) ({} files) would be removed",
            result.removed_count(),
            result.file_count()
        );
        out.push_str(&ColoredText::dim(line).render(supports_color));
        out.push('\n');
        return out;
    }

    let icon = Icon::Success.colored(supports_color, supports_unicode);
    for entry in &result.removed {
        out.push_str(&format!("  {} removed {}\n", icon, entry.reference()));
    }
    out.push_str(&format!(
        "{} Removed {} image(s) ({} files)\n",
        icon,
        result.removed_count(),
        result.file_count()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use kiln::domain::value_objects::Digest;

    fn entry(name: &str, tag: &str) -> IndexEntry {
        IndexEntry {
            name: name.to_string(),
            tag: tag.to_string(),
            digest: Digest::new("0123456789abcdef"),
            created_at: Utc::now(),
            file_count: 7,
        }
    }

    #[test]
    fn preview_lists_each_image() {
        let entries = vec![entry("web", "latest"), entry("api", "v2")];
        let rendered = render_clean_preview(&entries, false, false);
        assert!(rendered.contains("Would remove 2 image(s)"));
        assert!(rendered.contains("web:latest"));
        assert!(rendered.contains("api:v2"));
    }

    #[test]
    fn empty_preview_says_nothing_to_remove() {
        let rendered = render_clean_preview(&[], false, false);
        assert!(rendered.contains("Nothing to remove"));
    }

    #[test]
    fn dry_run_result_counts_without_removing() {
        let result = CleanResult {
            removed: vec![entry("web", "latest")],
            dry_run: true,
        };
        let rendered = render_clean_result(&result, false, false);
        assert!(rendered.contains("Dry run"));
        assert!(rendered.contains("1 image(s)"));
    }
}
