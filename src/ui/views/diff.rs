//! Diff command UI view

use kiln::application::ImageDiff;
use kiln::domain::services::{DiffTag, LineDiff};

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Render the diff command header
pub fn render_diff_header(
    left: &str,
    right: &str,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Diff, "kiln diff");
    header.add("Left", left);
    header.add("Right", right);
    header.render(supports_color, supports_unicode)
}

/// Render the full comparison: file deltas, then manifest metadata changes
pub fn render_image_diff(diff: &ImageDiff, supports_color: bool, supports_unicode: bool) -> String {
    if diff.is_identical() {
        return format!(
            "{} Images are identical\n",
            Icon::Success.colored(supports_color, supports_unicode)
        );
    }

    let mut out = String::new();

    if !diff.added.is_empty() {
        out.push_str(&format!("Added ({}):\n", diff.added.len()));
        for path in &diff.added {
            let line = format!("  + {}", path);
            out.push_str(&ColoredText::success(line).render(supports_color));
            out.push('\n');
        }
    }
    if !diff.removed.is_empty() {
        out.push_str(&format!("Removed ({}):\n", diff.removed.len()));
        for path in &diff.removed {
            let line = format!("  - {}", path);
            out.push_str(&ColoredText::error(line).render(supports_color));
            out.push('\n');
        }
    }
    if !diff.changed.is_empty() {
        out.push_str(&format!("Changed ({}):\n", diff.changed.len()));
        for path in &diff.changed {
            let line = format!("  ~ {}", path);
            out.push_str(&ColoredText::warning(line).render(supports_color));
            out.push('\n');
        }
    }

    if diff.metadata.has_changes {
        out.push_str("\nMetadata:\n");
        out.push_str(&render_line_diff(&diff.metadata, supports_color));
    }

    out.push('\n');
    out.push_str(&format!(
        "{} file change(s), metadata {}\n",
        diff.file_change_count(),
        diff.metadata.summary()
    ));
    out
}

/// Render changed manifest lines with +/- signs
fn render_line_diff(line_diff: &LineDiff, supports_color: bool) -> String {
    let mut out = String::new();
    for line in line_diff.changed_lines() {
        let colored = match line.tag {
            DiffTag::Insert => {
                ColoredText::success(format!("  + {}", line.content)).render(supports_color)
            }
            DiffTag::Delete => {
                ColoredText::error(format!("  - {}", line.content)).render(supports_color)
            }
            DiffTag::Equal => continue,
        };
        out.push_str(&colored);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use kiln::domain::services::Differ;

    fn diff_with(added: Vec<&str>, removed: Vec<&str>, changed: Vec<&str>) -> ImageDiff {
        ImageDiff {
            left: "web:v1".to_string(),
            right: "web:v2".to_string(),
            added: added.into_iter().map(String::from).collect(),
            removed: removed.into_iter().map(String::from).collect(),
            changed: changed.into_iter().map(String::from).collect(),
            metadata: Differ::new().diff("", ""),
        }
    }

    #[test]
    fn identical_images_render_one_line() {
        let rendered = render_image_diff(&diff_with(vec![], vec![], vec![]), false, false);
        assert!(rendered.contains("identical"));
    }

    #[test]
    fn file_deltas_render_with_signs() {
        let diff = diff_with(vec!["lib/new.py"], vec!["lib/old.py"], vec!["main.py"]);
        let rendered = render_image_diff(&diff, false, false);
        assert!(rendered.contains("+ lib/new.py"));
        assert!(rendered.contains("- lib/old.py"));
        assert!(rendered.contains("~ main.py"));
        assert!(rendered.contains("3 file change(s)"));
    }

    #[test]
    fn metadata_changes_render_changed_lines_only() {
        let mut diff = diff_with(vec![], vec![], vec![]);
        diff.metadata = Differ::new().diff("port = 8000\nsame\n", "port = 9000\nsame\n");
        let rendered = render_image_diff(&diff, false, false);
        assert!(rendered.contains("- port = 8000"));
        assert!(rendered.contains("+ port = 9000"));
        assert!(!rendered.contains("  same"));
    }

    #[test]
    fn added_only_layout() {
        let rendered = render_image_diff(&diff_with(vec!["lib/new.py"], vec![], vec![]), false, false);
        assert_snapshot!(rendered, @r"
        Added (1):
          + lib/new.py

        1 file change(s), metadata +0, -0
        ");
    }
}
