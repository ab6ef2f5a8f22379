//! Read-only GitHub wrapper for `--dry-run`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::errors::TriageResult;
use crate::domain::models::{Comment, IssueRef, Item, RepoRef};
use crate::domain::ports::GitHubApi;

/// Forwards reads to the wrapped port and logs writes instead of sending them.
pub struct DryRunGitHub {
    inner: Arc<dyn GitHubApi>,
}

impl DryRunGitHub {
    /// Wrap a port.
    pub fn new(inner: Arc<dyn GitHubApi>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl GitHubApi for DryRunGitHub {
    async fn list_comments(&self, repo: &RepoRef, number: u64) -> TriageResult<Vec<Comment>> {
        self.inner.list_comments(repo, number).await
    }

    async fn create_comment(&self, repo: &RepoRef, number: u64, body: &str) -> TriageResult<()> {
        info!(%repo, number, body, "dry run: would create comment");
        Ok(())
    }

    async fn update_comment(
        &self,
        repo: &RepoRef,
        comment_id: u64,
        body: &str,
    ) -> TriageResult<()> {
        info!(%repo, comment_id, body, "dry run: would update comment");
        Ok(())
    }

    async fn add_labels(
        &self,
        repo: &RepoRef,
        number: u64,
        labels: &[String],
    ) -> TriageResult<()> {
        info!(%repo, number, ?labels, "dry run: would add labels");
        Ok(())
    }

    async fn remove_label(&self, repo: &RepoRef, number: u64, label: &str) -> TriageResult<()> {
        info!(%repo, number, label, "dry run: would remove label");
        Ok(())
    }

    async fn get_issue(&self, repo: &RepoRef, number: u64) -> TriageResult<Item> {
        self.inner.get_issue(repo, number).await
    }

    async fn add_assignees(
        &self,
        repo: &RepoRef,
        number: u64,
        assignees: &[String],
    ) -> TriageResult<()> {
        info!(%repo, number, ?assignees, "dry run: would add assignees");
        Ok(())
    }

    async fn linked_issues(&self, repo: &RepoRef, pr_number: u64) -> TriageResult<Vec<IssueRef>> {
        self.inner.linked_issues(repo, pr_number).await
    }
}
