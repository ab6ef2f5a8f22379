//! In-memory GitHub for testing.
//!
//! Keeps comments, labels and assignees per item number, records every
//! call, and can be told to fail a given operation.

use std::collections::{BTreeSet, HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::errors::{TriageError, TriageResult};
use crate::domain::models::{Comment, IssueRef, Item, RepoRef};
use crate::domain::ports::GitHubApi;

/// A call made against the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    /// `list_comments`
    ListComments {
        /// Item number.
        number: u64,
    },
    /// `create_comment`
    CreateComment {
        /// Item number.
        number: u64,
        /// Comment body.
        body: String,
    },
    /// `update_comment`
    UpdateComment {
        /// Comment identifier.
        comment_id: u64,
        /// Replacement body.
        body: String,
    },
    /// `add_labels`
    AddLabels {
        /// Item number.
        number: u64,
        /// Labels added.
        labels: Vec<String>,
    },
    /// `remove_label`
    RemoveLabel {
        /// Item number.
        number: u64,
        /// Label removed.
        label: String,
    },
    /// `get_issue`
    GetIssue {
        /// Issue number.
        number: u64,
    },
    /// `add_assignees`
    AddAssignees {
        /// Item number.
        number: u64,
        /// Logins added.
        assignees: Vec<String>,
    },
    /// `linked_issues`
    LinkedIssues {
        /// Pull request number.
        number: u64,
    },
}

#[derive(Debug, Default)]
struct MockState {
    comments: HashMap<u64, Vec<Comment>>,
    labels: HashMap<u64, BTreeSet<String>>,
    assignees: HashMap<u64, Vec<String>>,
    issues: HashMap<u64, Item>,
    linked: HashMap<u64, Vec<IssueRef>>,
    failures: HashSet<String>,
    calls: Vec<ApiCall>,
    next_comment_id: u64,
}

impl MockState {
    fn record(&mut self, operation: &str, call: ApiCall) -> TriageResult<()> {
        self.calls.push(call);
        if self.failures.contains(operation) {
            return Err(TriageError::external(operation, "injected failure"));
        }
        Ok(())
    }
}

/// In-memory [`GitHubApi`] implementation.
#[derive(Debug)]
pub struct MockGitHub {
    state: RwLock<MockState>,
}

impl Default for MockGitHub {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGitHub {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MockState {
                next_comment_id: 1000,
                ..MockState::default()
            }),
        }
    }

    /// Add an existing comment to an item.
    pub async fn seed_comment(&self, number: u64, comment: Comment) {
        self.state
            .write()
            .await
            .comments
            .entry(number)
            .or_default()
            .push(comment);
    }

    /// Apply a label to an item.
    pub async fn seed_label(&self, number: u64, label: &str) {
        self.state
            .write()
            .await
            .labels
            .entry(number)
            .or_default()
            .insert(label.to_string());
    }

    /// Register an issue returned by `get_issue`.
    pub async fn seed_issue(&self, number: u64, item: Item) {
        self.state.write().await.issues.insert(number, item);
    }

    /// Set the issues a pull request closes.
    pub async fn seed_linked_issues(&self, number: u64, linked: Vec<IssueRef>) {
        self.state.write().await.linked.insert(number, linked);
    }

    /// Make every later call to `operation` fail.
    pub async fn fail_on(&self, operation: &str) {
        self.state
            .write()
            .await
            .failures
            .insert(operation.to_string());
    }

    /// Calls made so far, in order.
    pub async fn calls(&self) -> Vec<ApiCall> {
        self.state.read().await.calls.clone()
    }

    /// Comments currently on an item.
    pub async fn comments(&self, number: u64) -> Vec<Comment> {
        self.state
            .read()
            .await
            .comments
            .get(&number)
            .cloned()
            .unwrap_or_default()
    }

    /// Labels currently on an item, sorted.
    pub async fn labels(&self, number: u64) -> Vec<String> {
        self.state
            .read()
            .await
            .labels
            .get(&number)
            .map(|labels| labels.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Assignees currently on an item.
    pub async fn assignees(&self, number: u64) -> Vec<String> {
        self.state
            .read()
            .await
            .assignees
            .get(&number)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl GitHubApi for MockGitHub {
    async fn list_comments(&self, _repo: &RepoRef, number: u64) -> TriageResult<Vec<Comment>> {
        let mut state = self.state.write().await;
        state.record("list_comments", ApiCall::ListComments { number })?;
        Ok(state.comments.get(&number).cloned().unwrap_or_default())
    }

    async fn create_comment(&self, _repo: &RepoRef, number: u64, body: &str) -> TriageResult<()> {
        let mut state = self.state.write().await;
        state.record(
            "create_comment",
            ApiCall::CreateComment {
                number,
                body: body.to_string(),
            },
        )?;
        state.next_comment_id += 1;
        let id = state.next_comment_id;
        state
            .comments
            .entry(number)
            .or_default()
            .push(Comment::new(id, body));
        Ok(())
    }

    async fn update_comment(
        &self,
        _repo: &RepoRef,
        comment_id: u64,
        body: &str,
    ) -> TriageResult<()> {
        let mut state = self.state.write().await;
        state.record(
            "update_comment",
            ApiCall::UpdateComment {
                comment_id,
                body: body.to_string(),
            },
        )?;
        let comment = state
            .comments
            .values_mut()
            .flatten()
            .find(|comment| comment.id == comment_id)
            .ok_or_else(|| {
                TriageError::external("update_comment", format!("no comment {comment_id}"))
            })?;
        comment.body = body.to_string();
        Ok(())
    }

    async fn add_labels(
        &self,
        _repo: &RepoRef,
        number: u64,
        labels: &[String],
    ) -> TriageResult<()> {
        let mut state = self.state.write().await;
        state.record(
            "add_labels",
            ApiCall::AddLabels {
                number,
                labels: labels.to_vec(),
            },
        )?;
        state
            .labels
            .entry(number)
            .or_default()
            .extend(labels.iter().cloned());
        Ok(())
    }

    async fn remove_label(&self, _repo: &RepoRef, number: u64, label: &str) -> TriageResult<()> {
        let mut state = self.state.write().await;
        state.record(
            "remove_label",
            ApiCall::RemoveLabel {
                number,
                label: label.to_string(),
            },
        )?;
        let removed = state
            .labels
            .get_mut(&number)
            .is_some_and(|labels| labels.remove(label));
        if removed {
            Ok(())
        } else {
            Err(TriageError::NotFound(format!("label '{label}' on #{number}")))
        }
    }

    async fn get_issue(&self, _repo: &RepoRef, number: u64) -> TriageResult<Item> {
        let mut state = self.state.write().await;
        state.record("get_issue", ApiCall::GetIssue { number })?;
        state
            .issues
            .get(&number)
            .cloned()
            .ok_or_else(|| TriageError::external("get_issue", format!("no issue #{number}")))
    }

    async fn add_assignees(
        &self,
        _repo: &RepoRef,
        number: u64,
        assignees: &[String],
    ) -> TriageResult<()> {
        let mut state = self.state.write().await;
        state.record(
            "add_assignees",
            ApiCall::AddAssignees {
                number,
                assignees: assignees.to_vec(),
            },
        )?;
        let current = state.assignees.entry(number).or_default();
        for login in assignees {
            if !current.contains(login) {
                current.push(login.clone());
            }
        }
        Ok(())
    }

    async fn linked_issues(&self, _repo: &RepoRef, pr_number: u64) -> TriageResult<Vec<IssueRef>> {
        let mut state = self.state.write().await;
        state.record("linked_issues", ApiCall::LinkedIssues { number: pr_number })?;
        Ok(state.linked.get(&pr_number).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> RepoRef {
        RepoRef::new("octo-org", "widgets")
    }

    #[tokio::test]
    async fn test_remove_missing_label_is_not_found() {
        let mock = MockGitHub::new();
        let err = mock.remove_label(&repo(), 1, "release-notes").await.unwrap_err();
        assert!(matches!(err, TriageError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_injected_failure_is_recorded() {
        let mock = MockGitHub::new();
        mock.fail_on("create_comment").await;
        let err = mock.create_comment(&repo(), 1, "hello").await.unwrap_err();
        assert!(matches!(err, TriageError::ExternalCall { .. }));
        assert_eq!(mock.calls().await.len(), 1);
        assert!(mock.comments(1).await.is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_body() {
        let mock = MockGitHub::new();
        mock.create_comment(&repo(), 1, "first").await.unwrap();
        let id = mock.comments(1).await[0].id;
        mock.update_comment(&repo(), id, "second").await.unwrap();
        assert_eq!(mock.comments(1).await[0].body, "second");
    }
}
