//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

#![allow(dead_code)]

use std::io::Write;

use contributor_triage::{Actor, Item, ItemKind, RepoRef, Settings, TriageEvent};
use tempfile::NamedTempFile;

/// Repository used by every fixture.
pub fn repo() -> RepoRef {
    RepoRef::new("octo-org", "widgets")
}

/// Settings with short, recognizable templates.
pub fn settings() -> Settings {
    Settings {
        message_issue: "Thanks for the report.".to_string(),
        message_pr: "Thanks for the pull request.".to_string(),
        missing_issue_message: "Please link an issue.".to_string(),
        ..Settings::default()
    }
}

/// An event for an item opened by `login` with the given association.
pub fn event(item: Item, login: &str, association: &str) -> TriageEvent {
    let name = match item.kind {
        ItemKind::Issue => "issues",
        ItemKind::PullRequest => "pull_request_target",
    };
    TriageEvent::new(name, repo(), Actor::new(login, association), item)
}

/// A pull request body carrying a release-notes block.
pub fn body_with_release_notes() -> String {
    "Adds a cache.\n\n```release-notes\nResponses are now cached.\n```\n".to_string()
}

/// Write a webhook payload to a temporary file.
pub fn event_file(payload: &serde_json::Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create event file");
    write!(file, "{payload}").expect("Failed to write event file");
    file
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
