//! Property-based tests for tag handling.
//!
//! These tests use proptest to generate random tag lists and verify that
//! the reporting invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::version::{parse_semver_tag, supported_tags, with_sentinels};
    use proptest::prelude::*;

    fn tag_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            (0u64..20, 0u64..20, 0u64..20).prop_map(|(a, b, c)| format!("v{}.{}.{}", a, b, c)),
            (0u64..20, 0u64..20, 0u64..20).prop_map(|(a, b, c)| format!("{}.{}.{}", a, b, c)),
            "[a-z][a-z0-9-]{0,12}",
        ]
    }

    // ============================================================================
    // with_sentinels property tests
    // ============================================================================

    proptest! {
        /// Property: both sentinels are always reported
        #[test]
        fn with_sentinels_always_contains_sentinels(
            raw in prop::collection::vec(tag_strategy(), 0..40),
            min in tag_strategy(),
            edge in "[a-z]{1,12}",
        ) {
            let tags = with_sentinels(raw, &min, &edge);
            prop_assert!(tags.contains(&min));
            prop_assert!(tags.contains(&edge));
        }

        /// Property: nothing from the raw listing is lost, nothing is invented
        #[test]
        fn with_sentinels_is_exact_union(
            raw in prop::collection::vec(tag_strategy(), 0..40),
            min in tag_strategy(),
            edge in "[a-z]{1,12}",
        ) {
            let tags = with_sentinels(raw.clone(), &min, &edge);
            for tag in &raw {
                prop_assert!(tags.contains(tag));
            }
            for tag in &tags {
                prop_assert!(raw.contains(tag) || *tag == min || *tag == edge);
            }
        }
    }

    // ============================================================================
    // supported_tags property tests
    // ============================================================================

    proptest! {
        /// Property: the edge branch leads, every other entry is a release at or
        /// above the floor, and releases are in descending order
        #[test]
        fn supported_tags_respects_floor_and_order(
            raw in prop::collection::vec(tag_strategy(), 0..40),
            (a, b, c) in (0u64..20, 0u64..20, 0u64..20),
        ) {
            let min = format!("v{}.{}.{}", a, b, c);
            let floor = parse_semver_tag(&min).unwrap();
            let tags = with_sentinels(raw, &min, "development");

            let result = supported_tags(&tags, &min, "development");
            prop_assert_eq!(result.first().map(String::as_str), Some("development"));
            prop_assert!(result.contains(&min));

            let versions: Vec<_> = result[1..]
                .iter()
                .map(|t| parse_semver_tag(t).unwrap())
                .collect();
            for version in &versions {
                prop_assert!(*version >= floor);
            }
            for pair in versions.windows(2) {
                prop_assert!(pair[0] >= pair[1]);
            }
        }
    }
}
