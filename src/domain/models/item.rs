//! Issues, pull requests and the things attached to them.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::TriageError;

/// Which kind of item an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A plain issue.
    Issue,
    /// A pull request.
    PullRequest,
}

impl ItemKind {
    /// Human-readable name used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::PullRequest => "pull_request",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names of the labels currently applied to an item.
pub type LabelSet = BTreeSet<String>;

/// An issue or pull request as seen at the start of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Issue or pull request number within the repository.
    pub number: u64,
    /// Markdown body, absent when the author left it empty.
    pub body: Option<String>,
    /// Logins currently assigned.
    pub assignees: Vec<String>,
    /// Labels currently applied.
    pub labels: LabelSet,
    /// Issue or pull request.
    pub kind: ItemKind,
}

impl Item {
    /// Create an item with no body, assignees or labels.
    pub fn new(number: u64, kind: ItemKind) -> Self {
        Self {
            number,
            body: None,
            assignees: Vec::new(),
            labels: LabelSet::new(),
            kind,
        }
    }

    /// Set the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Add an assignee login.
    #[must_use]
    pub fn with_assignee(mut self, login: impl Into<String>) -> Self {
        self.assignees.push(login.into());
        self
    }

    /// Add a label.
    #[must_use]
    pub fn with_label(mut self, name: impl Into<String>) -> Self {
        self.labels.insert(name.into());
        self
    }

    /// Body text, treating an absent body as empty.
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }

    /// Whether the item is a pull request.
    pub fn is_pull_request(&self) -> bool {
        self.kind == ItemKind::PullRequest
    }

    /// Whether the named label is currently applied.
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.contains(name)
    }
}

/// A comment on an issue or pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Numeric comment identifier.
    pub id: u64,
    /// Markdown body.
    pub body: String,
}

impl Comment {
    /// Create a comment.
    pub fn new(id: u64, body: impl Into<String>) -> Self {
        Self {
            id,
            body: body.into(),
        }
    }
}

/// An issue that a pull request declares it closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRef {
    /// Issue number.
    pub number: u64,
}

/// `owner/name` coordinates of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    /// User or organization that owns the repository.
    pub owner: String,
    /// Repository name.
    pub name: String,
}

impl RepoRef {
    /// Create a repository reference.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl FromStr for RepoRef {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self::new(owner, name))
            }
            _ => Err(TriageError::InvalidPayload(format!(
                "repository must be in 'owner/name' form, got: '{s}'"
            ))),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_ref_parse() {
        let repo: RepoRef = "octo-org/widgets".parse().unwrap();
        assert_eq!(repo.owner, "octo-org");
        assert_eq!(repo.name, "widgets");
        assert_eq!(repo.to_string(), "octo-org/widgets");
    }

    #[test]
    fn test_repo_ref_rejects_malformed() {
        assert!("widgets".parse::<RepoRef>().is_err());
        assert!("/widgets".parse::<RepoRef>().is_err());
        assert!("octo-org/".parse::<RepoRef>().is_err());
        assert!("a/b/c".parse::<RepoRef>().is_err());
    }

    #[test]
    fn test_item_body_text_defaults_to_empty() {
        let item = Item::new(3, ItemKind::Issue);
        assert_eq!(item.body_text(), "");
        assert!(!item.is_pull_request());
    }

    #[test]
    fn test_item_builder() {
        let item = Item::new(7, ItemKind::PullRequest)
            .with_body("Fixes things")
            .with_assignee("alice")
            .with_label("bug");
        assert!(item.is_pull_request());
        assert_eq!(item.body_text(), "Fixes things");
        assert_eq!(item.assignees, vec!["alice".to_string()]);
        assert!(item.has_label("bug"));
        assert!(!item.has_label("release-notes"));
    }
}
