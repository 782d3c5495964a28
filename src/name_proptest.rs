//! Property-based tests for repository name validation.
//!
//! A name that passes validation is joined onto the staging and publish
//! roots, so these properties check that no accepted name can escape them.

#[cfg(test)]
mod proptest_tests {
    use crate::listing::{validate, validate_name, RepositoryDescriptor};
    use proptest::prelude::*;
    use std::path::{Component, Path};

    proptest! {
        /// Property: every accepted name is exactly one normal path component
        #[test]
        fn accepted_names_are_single_components(input in ".*") {
            if validate_name(&input).is_ok() {
                let components: Vec<_> = Path::new(&input).components().collect();
                prop_assert_eq!(components.len(), 1);
                prop_assert!(matches!(components[0], Component::Normal(_)));
            }
        }

        /// Property: names containing a path separator are always rejected
        #[test]
        fn names_with_separators_are_rejected(
            head in "[a-z]{0,8}",
            sep in prop::sample::select(vec!['/', '\\']),
            tail in "[a-z]{0,8}",
        ) {
            let name = format!("{}{}{}", head, sep, tail);
            prop_assert!(validate_name(&name).is_err());
        }

        /// Property: GitHub-style names are accepted
        #[test]
        fn github_style_names_are_accepted(input in "[A-Za-z0-9_-][A-Za-z0-9._-]{0,40}") {
            prop_assert!(validate_name(&input).is_ok());
        }

        /// Property: a listing with distinct valid names always validates, and
        /// repeating any entry makes it fail
        #[test]
        fn repeated_names_are_always_detected(
            names in prop::collection::hash_set("[a-z][a-z0-9-]{0,12}", 1..8),
            pick in any::<prop::sample::Index>(),
        ) {
            let mut repos: Vec<RepositoryDescriptor> = names
                .iter()
                .map(|n| RepositoryDescriptor::new(n, &format!("https://x/{}.git", n), None))
                .collect();
            prop_assert!(validate(&repos).is_ok());

            let duplicate = repos[pick.index(repos.len())].clone();
            repos.push(duplicate);
            prop_assert!(validate(&repos).is_err());
        }
    }
}
