use std::fmt;

use serde::{Deserialize, Serialize};

/// How the author of an item relates to the repository.
///
/// Mirrors GitHub's `author_association` vocabulary. Values outside the
/// known set are kept verbatim in [`AuthorAssociation::Other`] so they can
/// be logged and classified (as community) rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuthorAssociation {
    /// Owner of the repository.
    Owner,
    /// Member of the owning organization.
    Member,
    /// Invited collaborator on the repository.
    Collaborator,
    /// Has previously committed to the repository.
    Contributor,
    /// First contribution to this repository.
    FirstTimeContributor,
    /// First contribution to any GitHub repository.
    FirstTimer,
    /// Placeholder account for an imported user.
    Mannequin,
    /// No association.
    None,
    /// Any value GitHub may add later.
    Other(String),
}

impl AuthorAssociation {
    /// The wire spelling used by the GitHub API.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Owner => "OWNER",
            Self::Member => "MEMBER",
            Self::Collaborator => "COLLABORATOR",
            Self::Contributor => "CONTRIBUTOR",
            Self::FirstTimeContributor => "FIRST_TIME_CONTRIBUTOR",
            Self::FirstTimer => "FIRST_TIMER",
            Self::Mannequin => "MANNEQUIN",
            Self::None => "NONE",
            Self::Other(raw) => raw,
        }
    }
}

impl From<&str> for AuthorAssociation {
    fn from(value: &str) -> Self {
        match value {
            "OWNER" => Self::Owner,
            "MEMBER" => Self::Member,
            "COLLABORATOR" => Self::Collaborator,
            "CONTRIBUTOR" => Self::Contributor,
            "FIRST_TIME_CONTRIBUTOR" => Self::FirstTimeContributor,
            "FIRST_TIMER" => Self::FirstTimer,
            "MANNEQUIN" => Self::Mannequin,
            "NONE" => Self::None,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for AuthorAssociation {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<AuthorAssociation> for String {
    fn from(value: AuthorAssociation) -> Self {
        match value {
            AuthorAssociation::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl Default for AuthorAssociation {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl fmt::Display for AuthorAssociation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The author of the issue or pull request being triaged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// GitHub login, without the leading `@`.
    pub login: String,
    /// Relationship to the repository.
    pub association: AuthorAssociation,
}

impl Actor {
    /// Create an actor from a login and a raw association string.
    pub fn new(login: impl Into<String>, association: impl Into<AuthorAssociation>) -> Self {
        Self {
            login: login.into(),
            association: association.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_associations_parse() {
        assert_eq!(AuthorAssociation::from("MEMBER"), AuthorAssociation::Member);
        assert_eq!(
            AuthorAssociation::from("FIRST_TIME_CONTRIBUTOR"),
            AuthorAssociation::FirstTimeContributor
        );
        assert_eq!(AuthorAssociation::from("NONE"), AuthorAssociation::None);
    }

    #[test]
    fn test_unknown_association_is_preserved() {
        let assoc = AuthorAssociation::from("SPONSOR");
        assert_eq!(assoc, AuthorAssociation::Other("SPONSOR".to_string()));
        assert_eq!(assoc.to_string(), "SPONSOR");
    }

    #[test]
    fn test_association_is_case_sensitive() {
        assert_eq!(
            AuthorAssociation::from("member"),
            AuthorAssociation::Other("member".to_string())
        );
    }

    #[test]
    fn test_association_serde_uses_wire_spelling() {
        let json = serde_json::to_string(&AuthorAssociation::Collaborator).unwrap();
        assert_eq!(json, "\"COLLABORATOR\"");
        let parsed: AuthorAssociation = serde_json::from_str("\"FIRST_TIMER\"").unwrap();
        assert_eq!(parsed, AuthorAssociation::FirstTimer);
    }
}
