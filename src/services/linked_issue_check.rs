//! Missing linked-issue detection for pull requests.

use crate::domain::models::{IssueRef, Item, Settings};

/// Maximum number of closing issues requested from the query.
pub const LINKED_ISSUE_LIMIT: usize = 5;

/// Whether the linked-issue query should run for this item.
pub fn applies(settings: &Settings, item: &Item) -> bool {
    settings.warn_missing_issue && item.is_pull_request()
}

/// Whether the query found at least one closing issue.
pub fn has_linked_issue(linked: &[IssueRef]) -> bool {
    !linked.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ItemKind;

    #[test]
    fn test_applies_only_to_pull_requests_with_warning_enabled() {
        let warn = Settings {
            warn_missing_issue: true,
            ..Settings::default()
        };
        assert!(applies(&warn, &Item::new(1, ItemKind::PullRequest)));
        assert!(!applies(&warn, &Item::new(1, ItemKind::Issue)));
        assert!(!applies(&Settings::default(), &Item::new(1, ItemKind::PullRequest)));
    }

    #[test]
    fn test_has_linked_issue() {
        assert!(!has_linked_issue(&[]));
        assert!(has_linked_issue(&[IssueRef { number: 9 }]));
    }
}
