//! Property tests for dependency manifest parsing.

use std::path::Path;

use proptest::prelude::*;

use kiln::domain::value_objects::{Constraint, Requirement, Version};
use kiln::error::KilnError;
use kiln::manifest::parse_manifest;

fn package_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-zA-Z0-9][a-zA-Z0-9_.-]{0,15}").unwrap()
}

fn requirement() -> impl Strategy<Value = Requirement> {
    let version = proptest::collection::vec(0u64..1000, 1..=3).prop_map(|segments| {
        let written = segments
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(".");
        Version::parse(&written).unwrap()
    });

    (package_name(), proptest::option::of(("==|>=|<=|>|<", version))).prop_map(
        |(name, versioned)| {
            let constraint = match versioned {
                None => Constraint::Any,
                Some((op, version)) => match op.as_str() {
                    "==" => Constraint::Exact(version),
                    ">=" => Constraint::AtLeast(version),
                    "<=" => Constraint::AtMost(version),
                    ">" => Constraint::Greater(version),
                    _ => Constraint::Less(version),
                },
            };
            Requirement { name, constraint }
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `parse_manifest` never panics on arbitrary input.
    #[test]
    fn property_parse_manifest_never_panics(content in "(?s).{0,512}") {
        let _ = parse_manifest(&content, Path::new("requirements.txt"));
    }

    /// PROPERTY: Requirements survive a display/parse round trip.
    #[test]
    fn property_requirement_display_round_trips(requirement in requirement()) {
        let written = requirement.to_string();
        let parsed = Requirement::parse(&written).unwrap();
        prop_assert_eq!(parsed, requirement);
    }

    /// PROPERTY: Comments and blank lines never contribute requirements,
    /// and declared requirements come back in order.
    #[test]
    fn property_noise_lines_are_skipped(
        requirements in proptest::collection::vec(requirement(), 0..8),
        noise in proptest::collection::vec("( *)|(# [a-z ]{0,20})", 0..8),
    ) {
        let mut lines = Vec::new();
        for (i, requirement) in requirements.iter().enumerate() {
            if let Some(n) = noise.get(i) {
                lines.push(n.clone());
            }
            lines.push(requirement.to_string());
        }
        let content = lines.join("\n");

        let parsed = parse_manifest(&content, Path::new("requirements.txt")).unwrap();
        prop_assert_eq!(parsed, requirements);
    }

    /// PROPERTY: Syntax errors always point at a real, one-based line.
    #[test]
    fn property_error_lines_are_in_range(content in "(?s)[a-z0-9=<>. #\n]{0,256}") {
        if let Err(KilnError::ManifestSyntax { line, file, .. }) =
            parse_manifest(&content, Path::new("requirements.txt"))
        {
            let total = content.lines().count();
            prop_assert!(line >= 1 && line <= total, "line {} of {}", line, total);
            prop_assert_eq!(file, std::path::PathBuf::from("requirements.txt"));
        }
    }
}
