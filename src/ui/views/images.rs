//! Images command UI view
//!
//! A flat table: reference, short digest, age, file count. Column widths
//! follow display width so references with wide characters stay aligned.

use chrono::{DateTime, Utc};
use kiln::domain::entities::IndexEntry;
use unicode_width::UnicodeWidthStr;

use crate::ui::primitives::text::ColoredText;

const HEADERS: [&str; 4] = ["IMAGE", "DIGEST", "CREATED", "FILES"];

/// Render the image table, newest first
pub fn render_image_table(entries: &[IndexEntry], now: DateTime<Utc>, supports_color: bool) -> String {
    if entries.is_empty() {
        return "No images in the store. Run `kiln build` first.\n".to_string();
    }

    let mut rows: Vec<[String; 4]> = entries
        .iter()
        .map(|entry| {
            [
                entry.reference(),
                entry.digest.short().to_string(),
                format_age(entry.created_at, now),
                entry.file_count.to_string(),
            ]
        })
        .collect();
    rows.sort_by(|a, b| a[0].cmp(&b[0]));

    let mut widths = [0usize; 4];
    for (i, header) in HEADERS.iter().enumerate() {
        widths[i] = header.width();
    }
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let mut out = String::new();
    out.push_str(&render_row(
        &HEADERS.map(String::from),
        &widths,
        supports_color,
        true,
    ));
    for row in &rows {
        out.push_str(&render_row(row, &widths, supports_color, false));
    }
    out
}

fn render_row(cells: &[String; 4], widths: &[usize; 4], supports_color: bool, header: bool) -> String {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        let pad = widths[i].saturating_sub(cell.width());
        let text = if header {
            ColoredText::dim(cell.as_str()).render(supports_color)
        } else {
            cell.clone()
        };
        line.push_str(&text);
        if i + 1 < cells.len() {
            line.push_str(&" ".repeat(pad + 2));
        }
    }
    line.push('\n');
    line
}

/// Compact relative age, `docker images` style
pub fn format_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(created_at);
    let secs = delta.num_seconds();
    if secs < 0 {
        return "just now".to_string();
    }
    if secs < 60 {
        return format!("{}s ago", secs);
    }
    let mins = secs / 60;
    if mins < 60 {
        return format!("{}m ago", mins);
    }
    let hours = mins / 60;
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    let days = hours / 24;
    format!("{}d ago", days)
}
