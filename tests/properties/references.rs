//! Property tests for image references and content digests.

use proptest::prelude::*;

use kiln::domain::value_objects::{is_valid_name, Digest, ImageRef};

fn valid_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z0-9][a-z0-9._-]{0,15}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `ImageRef::parse` never panics on arbitrary input.
    #[test]
    fn property_reference_parse_never_panics(input in ".{0,64}") {
        let _ = ImageRef::parse(&input);
    }

    /// PROPERTY: Anything the name rule accepts builds a reference that
    /// survives a display/parse round trip.
    #[test]
    fn property_reference_display_round_trips(name in valid_name(), tag in valid_name()) {
        prop_assert!(is_valid_name(&name));
        let reference = ImageRef::new(&name, &tag).unwrap();
        let reparsed = ImageRef::parse(&reference.to_string()).unwrap();
        prop_assert_eq!(reparsed, reference);
    }

    /// PROPERTY: A bare name always gets the `latest` tag.
    #[test]
    fn property_bare_name_defaults_to_latest(name in valid_name()) {
        let reference = ImageRef::parse(&name).unwrap();
        prop_assert_eq!(reference.name(), name.as_str());
        prop_assert_eq!(reference.tag(), "latest");
    }

    /// PROPERTY: Store directories always nest exactly `images/<name>/<tag>`.
    #[test]
    fn property_store_dir_nests_under_images(name in valid_name(), tag in valid_name()) {
        let reference = ImageRef::new(&name, &tag).unwrap();
        let dir = reference.store_dir();
        let components: Vec<_> = dir
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        prop_assert_eq!(components, vec!["images".to_string(), name, tag]);
    }

    /// PROPERTY: Digests are deterministic and well formed.
    #[test]
    fn property_digest_is_stable_and_well_formed(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let first = Digest::from_bytes(&bytes);
        let second = Digest::from_bytes(&bytes);
        prop_assert!(first.matches(&second));

        prop_assert!(first.as_str().starts_with("sha256:"));
        prop_assert_eq!(first.hex().len(), 64);
        prop_assert!(first.hex().bytes().all(|b| b.is_ascii_hexdigit()));
        prop_assert_eq!(first.short(), &first.hex()[..12]);
    }
}
