//! GitHub port.
//!
//! The triage engine reaches GitHub exclusively through this trait, keeping
//! the decision logic independent of the REST/GraphQL transport.

use async_trait::async_trait;

use crate::domain::errors::TriageResult;
use crate::domain::models::{Comment, IssueRef, Item, RepoRef};

/// Capabilities the orchestrator needs from the hosting platform.
///
/// Every method maps to one remote call (or one paged listing). Failures
/// are reported as [`TriageError::ExternalCall`](crate::domain::errors::TriageError::ExternalCall),
/// except [`remove_label`](GitHubApi::remove_label) which reports a missing
/// label as [`TriageError::NotFound`](crate::domain::errors::TriageError::NotFound).
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// List every comment on an issue or pull request, oldest first.
    async fn list_comments(&self, repo: &RepoRef, number: u64) -> TriageResult<Vec<Comment>>;

    /// Post a new comment.
    async fn create_comment(&self, repo: &RepoRef, number: u64, body: &str) -> TriageResult<()>;

    /// Replace the body of an existing comment.
    async fn update_comment(&self, repo: &RepoRef, comment_id: u64, body: &str)
        -> TriageResult<()>;

    /// Apply labels, keeping those already present.
    async fn add_labels(&self, repo: &RepoRef, number: u64, labels: &[String])
        -> TriageResult<()>;

    /// Remove a single label.
    async fn remove_label(&self, repo: &RepoRef, number: u64, label: &str) -> TriageResult<()>;

    /// Fetch an issue (or pull request) by number.
    async fn get_issue(&self, repo: &RepoRef, number: u64) -> TriageResult<Item>;

    /// Add assignees, keeping those already present.
    async fn add_assignees(
        &self,
        repo: &RepoRef,
        number: u64,
        assignees: &[String],
    ) -> TriageResult<()>;

    /// Issues the pull request would close when merged (at most five).
    async fn linked_issues(&self, repo: &RepoRef, pr_number: u64) -> TriageResult<Vec<IssueRef>>;
}
