//! Version resolution
//!
//! Pure selection logic: given what the repository has, pick the version a
//! requirement gets. The rule is "highest satisfying version"; there is no
//! backtracking because requirements are independent of each other.

use crate::domain::value_objects::{Requirement, Version};

/// Highest available version satisfying the requirement
pub fn best_match(requirement: &Requirement, available: &[Version]) -> Option<Version> {
    available
        .iter()
        .filter(|v| requirement.matches(v))
        .max()
        .cloned()
}

/// Highest available version, unconstrained (system packages)
pub fn latest(available: &[Version]) -> Option<Version> {
    available.iter().max().cloned()
}

/// Render an available-version list for error messages, ascending
pub fn format_available(available: &[Version]) -> String {
    let mut sorted: Vec<&Version> = available.iter().collect();
    sorted.sort();
    sorted
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
