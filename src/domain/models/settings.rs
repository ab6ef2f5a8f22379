//! Triage settings, one immutable value per run.
//!
//! Keys use the kebab-case spelling of the GitHub Action inputs so the same
//! struct deserializes from a YAML file and from `INPUT_*` variables. The
//! older input names are listed in [`LEGACY_KEYS`]; the config loader
//! rewrites them before deserialization.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use super::item::ItemKind;

/// Older input names and the key each one stands for.
pub const LEGACY_KEYS: [(&str, &str); 4] = [
    ("reply-to-issue", "reply-to-issues"),
    ("reply-to-pull-request", "reply-to-prs"),
    ("message-pull-request", "message-pr"),
    ("pull-request-assignee-issue", "pr-assignee-from-issue"),
];

/// Configuration bundle consumed by every triage component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    /// Comment on issues opened by community contributors.
    #[serde(default = "default_true", deserialize_with = "action_bool")]
    pub reply_to_issues: bool,

    /// Comment on pull requests opened by community contributors.
    #[serde(default = "default_true", deserialize_with = "action_bool")]
    pub reply_to_prs: bool,

    /// Template appended to the greeting on issues.
    #[serde(default = "default_message_issue", deserialize_with = "lenient_string")]
    pub message_issue: String,

    /// Template appended to the greeting on pull requests.
    #[serde(
        default = "default_message_pr",
        deserialize_with = "lenient_string"
    )]
    pub message_pr: String,

    /// Label applied to every item opened by a community contributor.
    #[serde(
        default = "default_external_contributor_label",
        deserialize_with = "lenient_string"
    )]
    pub external_contributor_label: String,

    /// Label kept in sync with the body's `release-notes` block.
    #[serde(
        default = "default_release_notes_label",
        deserialize_with = "lenient_string"
    )]
    pub release_notes_label: String,

    /// Issue whose assignees are copied onto unassigned pull requests.
    /// Empty disables assignment.
    #[serde(default, deserialize_with = "lenient_string")]
    pub pr_assignee_from_issue: String,

    /// Warn on pull requests that do not close any issue.
    #[serde(default, deserialize_with = "action_bool")]
    pub warn_missing_issue: bool,

    /// Warning appended when a pull request has no linked issue.
    #[serde(
        default = "default_missing_issue_message",
        deserialize_with = "lenient_string"
    )]
    pub missing_issue_message: String,
}

impl Settings {
    /// Whether a welcome comment should be posted for this kind of item.
    pub const fn replies_to(&self, kind: ItemKind) -> bool {
        match kind {
            ItemKind::Issue => self.reply_to_issues,
            ItemKind::PullRequest => self.reply_to_prs,
        }
    }

    /// Template for this kind of item.
    pub fn template_for(&self, kind: ItemKind) -> &str {
        match kind {
            ItemKind::Issue => &self.message_issue,
            ItemKind::PullRequest => &self.message_pr,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reply_to_issues: true,
            reply_to_prs: true,
            message_issue: default_message_issue(),
            message_pr: default_message_pr(),
            external_contributor_label: default_external_contributor_label(),
            release_notes_label: default_release_notes_label(),
            pr_assignee_from_issue: String::new(),
            warn_missing_issue: false,
            missing_issue_message: default_missing_issue_message(),
        }
    }
}

const fn default_true() -> bool {
    true
}

fn default_message_issue() -> String {
    "Thanks for opening this issue! A maintainer will take a look soon. \
     Please make sure you have included steps to reproduce and the version you are using."
        .to_string()
}

fn default_message_pr() -> String {
    "Thanks for opening this pull request! A maintainer will review it soon. \
     Please make sure the checks pass and the description explains the change."
        .to_string()
}

fn default_external_contributor_label() -> String {
    "external-contributor".to_string()
}

fn default_release_notes_label() -> String {
    "release-notes".to_string()
}

fn default_missing_issue_message() -> String {
    "This pull request does not reference an issue. Please link the issue it \
     resolves (for example with `Closes #123`) so maintainers can track it."
        .to_string()
}

/// Accept native booleans and the YAML 1.2 core-schema spellings that
/// GitHub Actions accepts for boolean inputs.
fn action_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct ActionBool;

    impl Visitor<'_> for ActionBool {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean or one of true|True|TRUE|false|False|FALSE")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            match v.trim() {
                "true" | "True" | "TRUE" => Ok(true),
                "false" | "False" | "FALSE" => Ok(false),
                other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
            }
        }
    }

    deserializer.deserialize_any(ActionBool)
}

/// Accept strings as well as scalars that environment parsing may have
/// turned into numbers or booleans (e.g. `INPUT_PR-ASSIGNEE-FROM-ISSUE=42`).
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientString;

    impl Visitor<'_> for LenientString {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or scalar")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(LenientString)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.reply_to_issues);
        assert!(settings.reply_to_prs);
        assert!(!settings.warn_missing_issue);
        assert_eq!(settings.external_contributor_label, "external-contributor");
        assert_eq!(settings.release_notes_label, "release-notes");
        assert!(settings.pr_assignee_from_issue.is_empty());
    }

    #[test]
    fn test_yaml_uses_input_names() {
        let yaml = r"
reply-to-issues: false
message-pr: Hello PR
warn-missing-issue: 'True'
pr-assignee-from-issue: 12
";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert!(!settings.reply_to_issues);
        assert!(settings.reply_to_prs);
        assert_eq!(settings.message_pr, "Hello PR");
        assert!(settings.warn_missing_issue);
        assert_eq!(settings.pr_assignee_from_issue, "12");
    }

    #[test]
    fn test_invalid_boolean_is_rejected() {
        let result = serde_yaml::from_str::<Settings>("warn-missing-issue: 'yes please'");
        assert!(result.is_err());
    }

    #[test]
    fn test_replies_to_and_template_for() {
        let settings = Settings {
            reply_to_issues: false,
            message_issue: "issue text".to_string(),
            message_pr: "pr text".to_string(),
            ..Settings::default()
        };
        assert!(!settings.replies_to(ItemKind::Issue));
        assert!(settings.replies_to(ItemKind::PullRequest));
        assert_eq!(settings.template_for(ItemKind::Issue), "issue text");
        assert_eq!(settings.template_for(ItemKind::PullRequest), "pr text");
    }
}
