//! Inspect command UI view

use kiln::domain::entities::ImageManifest;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Render one image's manifest
pub fn render_manifest(
    manifest: &ImageManifest,
    show_files: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Images, manifest.reference());
    header.add("Digest", manifest.digest.as_str());
    header.add("Created", manifest.created_at.to_rfc3339());
    header.add("Port", manifest.exposed_port.to_string());
    header.add("Entry point", &manifest.entrypoint);
    header.add("Command", manifest.command.display_line());
    header.add("Files", manifest.file_count().to_string());

    let mut out = header.render(supports_color, supports_unicode);

    if !manifest.packages.is_empty() {
        out.push_str("\nPackages:\n");
        for (name, version) in &manifest.packages {
            out.push_str(&format!("  {} {}\n", name, version));
        }
    }
    if !manifest.system_packages.is_empty() {
        out.push_str("\nSystem packages:\n");
        for (name, version) in &manifest.system_packages {
            out.push_str(&format!("  {} {}\n", name, version));
        }
    }
    if !manifest.env.is_empty() {
        out.push_str("\nEnvironment defaults:\n");
        for (name, value) in &manifest.env {
            if value.is_empty() {
                let placeholder = ColoredText::dim("(unset)").render(supports_color);
                out.push_str(&format!("  {}={}\n", name, placeholder));
            } else {
                out.push_str(&format!("  {}={}\n", name, value));
            }
        }
    }

    if show_files {
        out.push_str(&format!("\nFiles ({}):\n", manifest.file_count()));
        for (path, digest) in &manifest.files {
            out.push_str(&format!("  {}  {}\n", digest.short(), path));
        }
    }

    out
}
