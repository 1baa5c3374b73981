//! Property tests for version parsing, ordering and resolution.

use proptest::prelude::*;

use kiln::domain::services::resolver;
use kiln::domain::value_objects::{Requirement, Version};

fn segments() -> impl Strategy<Value = Vec<u64>> {
    proptest::collection::vec(0u64..1000, 1..=3)
}

fn render(segments: &[u64]) -> String {
    segments
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

fn version() -> impl Strategy<Value = Version> {
    segments().prop_map(|s| Version::parse(&render(&s)).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `Version::parse` never panics on arbitrary small input.
    #[test]
    fn property_version_parse_never_panics(input in ".{0,64}") {
        let _ = Version::parse(&input);
    }

    /// PROPERTY: Canonical version strings survive a parse/display round trip.
    #[test]
    fn property_version_display_round_trips(segments in segments()) {
        let written = render(&segments);
        let parsed = Version::parse(&written).unwrap();
        prop_assert_eq!(parsed.to_string(), written);
    }

    /// PROPERTY: Ordering agrees with numeric comparison of zero-padded segments.
    #[test]
    fn property_version_ordering_matches_padded_segments(
        left in segments(),
        right in segments(),
    ) {
        let a = Version::parse(&render(&left)).unwrap();
        let b = Version::parse(&render(&right)).unwrap();

        let padded = |s: &[u64], i: usize| s.get(i).copied().unwrap_or(0);
        let expected = (0..3)
            .map(|i| padded(&left, i).cmp(&padded(&right, i)))
            .find(|o| !o.is_eq())
            .unwrap_or(std::cmp::Ordering::Equal);

        prop_assert_eq!(a.cmp(&b), expected);
    }

    /// PROPERTY: Trailing zero segments never change equality.
    #[test]
    fn property_trailing_zeros_compare_equal(segments in proptest::collection::vec(0u64..1000, 1..=2)) {
        let short = Version::parse(&render(&segments)).unwrap();
        let mut extended = segments.clone();
        extended.push(0);
        let long = Version::parse(&render(&extended)).unwrap();
        prop_assert_eq!(short, long);
    }

    /// PROPERTY: `best_match` returns a satisfying version, and the largest one.
    #[test]
    fn property_best_match_is_maximal_and_satisfying(
        available in proptest::collection::vec(version(), 0..10),
        constraint_version in version(),
        operator in prop_oneof![
            Just(""), Just("=="), Just(">="), Just("<="), Just(">"), Just("<"),
        ],
    ) {
        let raw = if operator.is_empty() {
            "pkg".to_string()
        } else {
            format!("pkg{}{}", operator, constraint_version)
        };
        let requirement = Requirement::parse(&raw).unwrap();

        match resolver::best_match(&requirement, &available) {
            Some(chosen) => {
                prop_assert!(requirement.matches(&chosen));
                for candidate in &available {
                    if requirement.matches(candidate) {
                        prop_assert!(candidate <= &chosen);
                    }
                }
            }
            None => {
                for candidate in &available {
                    prop_assert!(!requirement.matches(candidate));
                }
            }
        }
    }
}
