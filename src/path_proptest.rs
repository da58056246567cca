//! Property-based tests for repository path functions.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::path::{canonicalize_path, is_base_path, validate_path};
    use proptest::prelude::*;

    /// Strategy producing canonical repository paths below the root.
    fn canonical_path() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-z][a-z0-9]{0,5}", 1..5)
            .prop_map(|segments| format!("/{}", segments.join("/")))
    }

    // ============================================================================
    // canonicalize_path property tests
    // ============================================================================

    proptest! {
        /// Property: canonical paths pass validation and canonicalize to themselves
        #[test]
        fn canonical_paths_are_fixed_points(path in canonical_path()) {
            prop_assert!(validate_path(&path).is_ok());
            prop_assert_eq!(canonicalize_path(&path).unwrap(), path);
        }

        /// Property: canonicalize output always passes validation
        #[test]
        fn canonicalize_output_is_valid(path in "(/+(\\.|[a-z0-9]{1,4})?){1,8}") {
            if let Ok(canonical) = canonicalize_path(&path) {
                prop_assert!(
                    validate_path(&canonical).is_ok(),
                    "canonicalize produced invalid path '{}' from input '{}'",
                    canonical,
                    path
                );
            }
        }

        /// Property: canonicalize is idempotent
        #[test]
        fn canonicalize_is_idempotent(path in "(/+(\\.\\.|\\.|[a-z0-9]{1,4})?){1,8}") {
            if let Ok(first) = canonicalize_path(&path) {
                prop_assert_eq!(canonicalize_path(&first).unwrap(), first);
            }
        }

        /// Property: interspersed '.' segments never change the canonical form
        #[test]
        fn dot_segments_are_invisible(path in canonical_path()) {
            let dotted = path.replace('/', "/./");
            prop_assert_eq!(canonicalize_path(&dotted).unwrap(), path);
        }
    }

    // ============================================================================
    // is_base_path property tests
    // ============================================================================

    proptest! {
        /// Property: every path is a base of itself
        #[test]
        fn base_path_is_reflexive(path in canonical_path()) {
            prop_assert!(is_base_path(&path, &path));
        }

        /// Property: the root is a base of every path
        #[test]
        fn root_is_base_of_everything(path in canonical_path()) {
            prop_assert!(is_base_path("/", &path));
        }

        /// Property: appending a segment keeps the original path a base
        #[test]
        fn parent_is_base_of_child(path in canonical_path(), segment in "[a-z][a-z0-9]{0,5}") {
            let child = format!("{path}/{segment}");
            prop_assert!(is_base_path(&path, &child));
            prop_assert!(!is_base_path(&child, &path));
        }

        /// Property: base containment implies string-prefix containment
        #[test]
        fn base_implies_prefix(a in canonical_path(), b in canonical_path()) {
            if is_base_path(&a, &b) {
                prop_assert!(b.starts_with(&a));
            }
        }
    }
}
