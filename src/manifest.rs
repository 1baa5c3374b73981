//! Dependency manifest parsing
//!
//! The manifest is plain text, one requirement per line (`fastapi==0.115.0`,
//! `uvicorn>=0.30`, bare `httpx`). `#` starts a comment, blank lines are
//! skipped. Any malformed line aborts with the file and line number, which in
//! turn aborts the build that asked for it.

use std::path::Path;

use crate::domain::value_objects::Requirement;
use crate::error::{KilnError, KilnResult};

/// Parse a dependency manifest file from disk
pub fn parse_manifest_file(path: &Path) -> KilnResult<Vec<Requirement>> {
    if !path.exists() {
        return Err(KilnError::ManifestNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_manifest(&content, path)
}

/// Parse dependency manifest content
///
/// `file` is only used for error reporting.
pub fn parse_manifest(content: &str, file: &Path) -> KilnResult<Vec<Requirement>> {
    let mut requirements = Vec::new();
    for (index, raw_line) in content.lines().enumerate() {
        let line = match raw_line.find('#') {
            Some(at) => &raw_line[..at],
            None => raw_line,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let requirement = Requirement::parse(line).map_err(|message| KilnError::ManifestSyntax {
            file: file.to_path_buf(),
            line: index + 1,
            message,
        })?;
        requirements.push(requirement);
    }
    Ok(requirements)
}
