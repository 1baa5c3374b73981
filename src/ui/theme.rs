use crossterm::style::Color;

/// Design tokens for the kiln CLI.
///
/// Design constraints:
/// - Only 5 semantic colors (`colors::*`)
/// - All icons must be sourced from this module
pub mod colors {
    use super::Color;

    /// #22C55E
    pub const SUCCESS: Color = Color::Green;
    /// #EF4444
    pub const ERROR: Color = Color::Red;
    /// #F59E0B
    pub const WARNING: Color = Color::Yellow;
    /// #06B6D4
    pub const INFO: Color = Color::Cyan;
    /// #6B7280
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const PROGRESS: &str = "●";
    pub const PENDING: &str = "○";
    pub const ARROW: &str = "↳";

    // Command identifiers (used in headers).
    pub const BUILD: &str = "🔥";
    pub const RUN: &str = "▶";
    pub const SMOKE: &str = "💨";
    pub const CHECK: &str = "🔍";
    pub const IMAGES: &str = "🗂";
    pub const DIFF: &str = "Δ";
    pub const CLEAN: &str = "🧹";
    pub const PUSH: &str = "📡";
    pub const INIT: &str = "📦";
}

pub mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const WARNING: &str = "[WARN]";
    pub const PROGRESS: &str = "[..]";
    pub const PENDING: &str = "[ ]";
    pub const ARROW: &str = "[>]";

    pub const BUILD: &str = "[BUILD]";
    pub const RUN: &str = "[RUN]";
    pub const SMOKE: &str = "[SMOKE]";
    pub const CHECK: &str = "[CHECK]";
    pub const IMAGES: &str = "[IMAGES]";
    pub const DIFF: &str = "[DIFF]";
    pub const CLEAN: &str = "[CLEAN]";
    pub const PUSH: &str = "[PUSH]";
    pub const INIT: &str = "[INIT]";
}
