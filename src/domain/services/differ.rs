//! Differ Domain Service
//!
//! Line-level comparison of two text documents, used by `kiln diff` to show
//! how the metadata of two built images differs.

use similar::{ChangeTag, TextDiff};

/// A single line change in a diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    /// The type of change
    pub tag: DiffTag,
    /// Line number in the old version (if applicable)
    pub old_line: Option<usize>,
    /// Line number in the new version (if applicable)
    pub new_line: Option<usize>,
    /// Line content without the trailing newline
    pub content: String,
}

/// Type of change in a diff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffTag {
    /// Line was deleted
    Delete,
    /// Line was inserted
    Insert,
    /// Line is unchanged
    Equal,
}

impl From<ChangeTag> for DiffTag {
    fn from(tag: ChangeTag) -> Self {
        match tag {
            ChangeTag::Delete => DiffTag::Delete,
            ChangeTag::Insert => DiffTag::Insert,
            ChangeTag::Equal => DiffTag::Equal,
        }
    }
}

/// Result of a line diff
#[derive(Debug, Clone, Default)]
pub struct LineDiff {
    /// All lines in the diff
    pub lines: Vec<DiffLine>,
    /// Number of lines added
    pub additions: usize,
    /// Number of lines deleted
    pub deletions: usize,
    /// Whether there are any changes
    pub has_changes: bool,
}

impl LineDiff {
    /// Get only the changed lines (insertions and deletions)
    pub fn changed_lines(&self) -> Vec<&DiffLine> {
        self.lines
            .iter()
            .filter(|l| l.tag != DiffTag::Equal)
            .collect()
    }

    /// Short counts summary (e.g., "+5, -3")
    pub fn summary(&self) -> String {
        format!("+{}, -{}", self.additions, self.deletions)
    }
}

/// Differ service for computing line differences
#[derive(Debug, Clone, Copy, Default)]
pub struct Differ;

impl Differ {
    /// Create a new Differ instance
    pub fn new() -> Self {
        Self
    }

    /// Compute the diff between two strings
    pub fn diff(&self, old: &str, new: &str) -> LineDiff {
        let text_diff = TextDiff::from_lines(old, new);

        let mut result = LineDiff::default();

        for change in text_diff.iter_all_changes() {
            let tag = DiffTag::from(change.tag());

            match tag {
                DiffTag::Delete => result.deletions += 1,
                DiffTag::Insert => result.additions += 1,
                DiffTag::Equal => {}
            }

            result.lines.push(DiffLine {
                tag,
                old_line: change.old_index().map(|i| i + 1),
                new_line: change.new_index().map(|i| i + 1),
                content: change.value().trim_end_matches('\n').to_string(),
            });
        }

        result.has_changes = result.additions > 0 || result.deletions > 0;
        result
    }
}
