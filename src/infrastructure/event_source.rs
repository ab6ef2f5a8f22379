//! Webhook event intake.
//!
//! Reads the payload GitHub Actions writes to `GITHUB_EVENT_PATH` and
//! normalizes it into a [`TriageEvent`].

use std::path::Path;

use tracing::info;

use crate::adapters::github::models::EventPayload;
use crate::domain::errors::{TriageError, TriageResult};
use crate::domain::models::{ItemKind, RepoRef, TriageEvent};

use super::workflow_commands;

/// Informational details about the workflow run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionContext {
    /// `GITHUB_EVENT_NAME`
    pub event_name: Option<String>,
    /// `GITHUB_SHA`
    pub sha: Option<String>,
    /// `GITHUB_REF`
    pub git_ref: Option<String>,
    /// `GITHUB_WORKFLOW`
    pub workflow: Option<String>,
    /// `GITHUB_ACTION`
    pub action: Option<String>,
    /// `GITHUB_ACTOR`
    pub actor: Option<String>,
    /// `GITHUB_RUN_NUMBER`
    pub run_number: Option<String>,
    /// `GITHUB_RUN_ID`
    pub run_id: Option<String>,
}

impl ActionContext {
    /// Read the context from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the context through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            event_name: lookup("GITHUB_EVENT_NAME"),
            sha: lookup("GITHUB_SHA"),
            git_ref: lookup("GITHUB_REF"),
            workflow: lookup("GITHUB_WORKFLOW"),
            action: lookup("GITHUB_ACTION"),
            actor: lookup("GITHUB_ACTOR"),
            run_number: lookup("GITHUB_RUN_NUMBER"),
            run_id: lookup("GITHUB_RUN_ID"),
        }
    }

    /// Log the context inside a collapsible group.
    pub fn log(&self) {
        workflow_commands::start_group("Context info");
        info!(
            event_name = self.event_name.as_deref().unwrap_or_default(),
            sha = self.sha.as_deref().unwrap_or_default(),
            git_ref = self.git_ref.as_deref().unwrap_or_default(),
            workflow = self.workflow.as_deref().unwrap_or_default(),
            action = self.action.as_deref().unwrap_or_default(),
            actor = self.actor.as_deref().unwrap_or_default(),
            run_number = self.run_number.as_deref().unwrap_or_default(),
            run_id = self.run_id.as_deref().unwrap_or_default(),
            "workflow context"
        );
        workflow_commands::end_group();
    }
}

/// Read and parse a webhook payload file.
pub fn read_event(path: &Path) -> TriageResult<EventPayload> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        TriageError::InvalidPayload(format!("cannot read {}: {e}", path.display()))
    })?;
    Ok(serde_json::from_str(&raw)?)
}

/// Normalize a payload into a [`TriageEvent`].
///
/// A `pull_request` object wins over an `issue` object. An `issue` that
/// carries a `pull_request` reference (comment events on pull requests) is
/// treated as a pull request. `repository` is used when the payload has no
/// repository object.
pub fn triage_event(
    name: &str,
    payload: EventPayload,
    repository: Option<&str>,
) -> TriageResult<TriageEvent> {
    let repo: RepoRef = match (&payload.repository, repository) {
        (Some(repo), _) => repo.full_name.parse()?,
        (None, Some(fallback)) => fallback.parse()?,
        (None, None) => {
            return Err(TriageError::InvalidPayload(
                "repository is missing from the payload and was not given".to_string(),
            ))
        }
    };

    let (raw, kind) = match (payload.pull_request, payload.issue) {
        (Some(pr), _) => (pr, ItemKind::PullRequest),
        (None, Some(issue)) => {
            let kind = issue.kind();
            (issue, kind)
        }
        (None, None) => return Err(TriageError::MissingPayload),
    };

    let actor = raw.author();
    let item = raw.into_item(kind);
    info!(
        event = name,
        action = payload.action.as_deref().unwrap_or_default(),
        %repo,
        number = item.number,
        kind = %kind,
        login = %actor.login,
        "loaded event"
    );

    Ok(TriageEvent::new(name, repo, actor, item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::AuthorAssociation;
    use std::io::Write;

    fn payload(json: &str) -> EventPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_pull_request_event() {
        let event = triage_event(
            "pull_request_target",
            payload(
                r#"{
                    "action": "opened",
                    "pull_request": {
                        "number": 17,
                        "body": "```release-notes\nAdds caching\n```",
                        "user": { "login": "newbie" },
                        "author_association": "FIRST_TIME_CONTRIBUTOR",
                        "labels": [],
                        "assignees": []
                    },
                    "repository": { "full_name": "octo-org/widgets" }
                }"#,
            ),
            None,
        )
        .unwrap();

        assert_eq!(event.item.kind, ItemKind::PullRequest);
        assert_eq!(event.item.number, 17);
        assert_eq!(event.actor.login, "newbie");
        assert_eq!(
            event.actor.association,
            AuthorAssociation::FirstTimeContributor
        );
        assert_eq!(event.repo, RepoRef::new("octo-org", "widgets"));
    }

    #[test]
    fn test_issue_comment_on_pull_request() {
        let event = triage_event(
            "issue_comment",
            payload(
                r#"{
                    "issue": {
                        "number": 5,
                        "user": { "login": "someone" },
                        "author_association": "CONTRIBUTOR",
                        "pull_request": { "url": "https://api.github.com/repos/o/r/pulls/5" }
                    }
                }"#,
            ),
            Some("o/r"),
        )
        .unwrap();

        assert_eq!(event.item.kind, ItemKind::PullRequest);
        assert_eq!(event.repo.to_string(), "o/r");
    }

    #[test]
    fn test_plain_issue() {
        let event = triage_event(
            "issues",
            payload(r#"{ "issue": { "number": 2, "author_association": "NONE" } }"#),
            Some("o/r"),
        )
        .unwrap();
        assert_eq!(event.item.kind, ItemKind::Issue);
        assert_eq!(event.actor.association, AuthorAssociation::None);
    }

    #[test]
    fn test_missing_item_is_missing_payload() {
        let err = triage_event("push", payload(r#"{ "ref": "refs/heads/main" }"#), Some("o/r"))
            .unwrap_err();
        assert!(matches!(err, TriageError::MissingPayload));
    }

    #[test]
    fn test_missing_repository() {
        let err = triage_event("issues", payload(r#"{ "issue": { "number": 2 } }"#), None)
            .unwrap_err();
        assert!(matches!(err, TriageError::InvalidPayload(_)));
    }

    #[test]
    fn test_read_event_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "issue": {{ "number": 11 }} }}"#).unwrap();
        let payload = read_event(file.path()).unwrap();
        assert_eq!(payload.issue.unwrap().number, 11);
    }

    #[test]
    fn test_read_event_errors() {
        let err = read_event(Path::new("/nonexistent/event.json")).unwrap_err();
        assert!(matches!(err, TriageError::InvalidPayload(_)));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            read_event(file.path()),
            Err(TriageError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_context_from_lookup() {
        let ctx = ActionContext::from_lookup(|name| match name {
            "GITHUB_EVENT_NAME" => Some("issues".to_string()),
            "GITHUB_RUN_ID" => Some("123".to_string()),
            _ => None,
        });
        assert_eq!(ctx.event_name.as_deref(), Some("issues"));
        assert_eq!(ctx.run_id.as_deref(), Some("123"));
        assert!(ctx.sha.is_none());
    }
}
