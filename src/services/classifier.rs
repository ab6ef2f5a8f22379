//! Contributor classification.

use crate::domain::models::{AuthorAssociation, Classification};

/// Associations that are never treated as community contributors.
///
/// Anything else, including associations GitHub may introduce later,
/// is classified as community.
pub fn is_excluded(association: &AuthorAssociation) -> bool {
    matches!(
        association,
        AuthorAssociation::Member | AuthorAssociation::Collaborator | AuthorAssociation::None
    )
}

/// Classify an author by their association with the repository.
pub fn classify(association: &AuthorAssociation) -> Classification {
    Classification {
        is_community_contributor: !is_excluded(association),
        is_first_time_contributor: matches!(
            association,
            AuthorAssociation::FirstTimeContributor
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_excluded_associations_are_not_community() {
        for raw in ["MEMBER", "COLLABORATOR", "NONE"] {
            let result = classify(&AuthorAssociation::from(raw));
            assert!(!result.is_community_contributor, "{raw} should be excluded");
            assert!(!result.is_first_time_contributor);
        }
    }

    #[test]
    fn test_first_time_contributor() {
        let result = classify(&AuthorAssociation::FirstTimeContributor);
        assert!(result.is_community_contributor);
        assert!(result.is_first_time_contributor);
    }

    #[test]
    fn test_first_timer_is_community_but_not_first_time_contributor() {
        let result = classify(&AuthorAssociation::FirstTimer);
        assert!(result.is_community_contributor);
        assert!(!result.is_first_time_contributor);
    }

    #[test]
    fn test_owner_and_contributor_are_community() {
        assert!(classify(&AuthorAssociation::Owner).is_community_contributor);
        assert!(classify(&AuthorAssociation::Contributor).is_community_contributor);
    }

    #[test]
    fn test_empty_association_fails_open() {
        let result = classify(&AuthorAssociation::from(""));
        assert!(result.is_community_contributor);
    }

    proptest! {
        #[test]
        fn prop_unknown_associations_are_community(raw in "[A-Za-z_]{0,24}") {
            prop_assume!(!matches!(raw.as_str(), "MEMBER" | "COLLABORATOR" | "NONE"));
            let result = classify(&AuthorAssociation::from(raw.as_str()));
            prop_assert!(result.is_community_contributor);
            prop_assert_eq!(
                result.is_first_time_contributor,
                raw == "FIRST_TIME_CONTRIBUTOR"
            );
        }
    }
}
