//! GitHub REST, GraphQL and webhook models.
//!
//! These structs map to the JSON GitHub sends and accepts. They are used
//! by the HTTP client and the event reader and are converted into domain
//! models at the adapter boundary.

use serde::{Deserialize, Serialize};

use crate::domain::models::{Actor, Comment, IssueRef, Item, ItemKind};

/// A user reference (author or assignee).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubUser {
    /// GitHub login.
    pub login: String,
}

/// A label applied to an issue or pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubLabel {
    /// The label name.
    pub name: String,
}

/// Reference object present on issues that are really pull requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubPullRequestRef {
    /// API URL of the pull request resource.
    #[serde(default)]
    pub url: Option<String>,
}

/// An issue or pull request, as returned by `GET /issues/{n}` or embedded
/// in a webhook payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubIssue {
    /// Sequential number within the repository.
    pub number: u64,
    /// Body text (may be absent or null).
    #[serde(default)]
    pub body: Option<String>,
    /// Author.
    #[serde(default)]
    pub user: Option<GitHubUser>,
    /// Author's relationship to the repository, e.g. `FIRST_TIME_CONTRIBUTOR`.
    #[serde(default)]
    pub author_association: Option<String>,
    /// Labels applied.
    #[serde(default)]
    pub labels: Vec<GitHubLabel>,
    /// Current assignees.
    #[serde(default)]
    pub assignees: Vec<GitHubUser>,
    /// Present when this issue is actually a pull request.
    #[serde(default)]
    pub pull_request: Option<GitHubPullRequestRef>,
}

impl GitHubIssue {
    /// Issue, or pull request when the `pull_request` reference is set.
    pub const fn kind(&self) -> ItemKind {
        if self.pull_request.is_some() {
            ItemKind::PullRequest
        } else {
            ItemKind::Issue
        }
    }

    /// Author and association; missing fields become empty strings.
    pub fn author(&self) -> Actor {
        Actor::new(
            self.user
                .as_ref()
                .map(|user| user.login.clone())
                .unwrap_or_default(),
            self.author_association.clone().unwrap_or_default(),
        )
    }

    /// Convert into a domain item of the given kind.
    pub fn into_item(self, kind: ItemKind) -> Item {
        Item {
            number: self.number,
            body: self.body,
            assignees: self.assignees.into_iter().map(|user| user.login).collect(),
            labels: self.labels.into_iter().map(|label| label.name).collect(),
            kind,
        }
    }
}

/// A comment returned by `GET /issues/{n}/comments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubComment {
    /// Comment identifier.
    pub id: u64,
    /// Markdown body.
    #[serde(default)]
    pub body: Option<String>,
}

impl From<GitHubComment> for Comment {
    fn from(comment: GitHubComment) -> Self {
        Self::new(comment.id, comment.body.unwrap_or_default())
    }
}

/// Request body for creating or updating a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubCommentRequest {
    /// The comment body.
    pub body: String,
}

/// Request body for `POST /issues/{n}/labels`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubLabelsRequest {
    /// Labels to add.
    pub labels: Vec<String>,
}

/// Request body for `POST /issues/{n}/assignees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubAssigneesRequest {
    /// Logins to add.
    pub assignees: Vec<String>,
}

/// Repository object embedded in webhook payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRepository {
    /// `owner/name`.
    pub full_name: String,
}

/// The subset of an `issues`/`pull_request`/`issue_comment` webhook
/// payload that triage reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPayload {
    /// Webhook action, e.g. `opened`.
    #[serde(default)]
    pub action: Option<String>,
    /// Issue object (also present on comment events for pull requests).
    #[serde(default)]
    pub issue: Option<GitHubIssue>,
    /// Pull request object.
    #[serde(default)]
    pub pull_request: Option<GitHubIssue>,
    /// Repository the event belongs to.
    #[serde(default)]
    pub repository: Option<GitHubRepository>,
}

/// GraphQL query for the issues a pull request closes.
pub const LINKED_ISSUES_QUERY: &str = r"
query($owner: String!, $repo: String!, $number: Int!, $first: Int!) {
  repository(owner: $owner, name: $repo) {
    pullRequest(number: $number) {
      closingIssuesReferences(first: $first) {
        nodes { number }
      }
    }
  }
}";

/// A GraphQL request envelope.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<V> {
    /// Query document.
    pub query: &'static str,
    /// Query variables.
    pub variables: V,
}

/// Variables for [`LINKED_ISSUES_QUERY`].
#[derive(Debug, Clone, Serialize)]
pub struct LinkedIssuesVariables {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Pull request number.
    pub number: u64,
    /// Page size.
    pub first: usize,
}

/// A GraphQL response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    /// Payload, absent when the query failed entirely.
    pub data: Option<T>,
    /// Errors reported by the server.
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// One GraphQL error.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    /// Human-readable message.
    pub message: String,
}

/// `data` of [`LINKED_ISSUES_QUERY`].
#[derive(Debug, Clone, Deserialize)]
pub struct LinkedIssuesData {
    /// Repository, null when not visible to the token.
    pub repository: Option<RepositoryNode>,
}

/// Repository node.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNode {
    /// Pull request, null when the number does not exist.
    pub pull_request: Option<PullRequestNode>,
}

/// Pull request node.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestNode {
    /// Issues closed by merging.
    pub closing_issues_references: IssueConnection,
}

/// Issue connection.
///
/// GitHub types `nodes` as `[Issue]`: the list and each entry may be null,
/// e.g. for issues in repositories the token cannot read.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueConnection {
    /// Issue nodes.
    #[serde(default)]
    pub nodes: Option<Vec<Option<IssueNode>>>,
}

/// Issue node.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueNode {
    /// Issue number.
    pub number: u64,
}

impl LinkedIssuesData {
    /// Flatten into issue references; a missing repository or pull request
    /// yields none.
    pub fn into_refs(self) -> Vec<IssueRef> {
        self.repository
            .and_then(|repo| repo.pull_request)
            .map(|pr| {
                pr.closing_issues_references
                    .nodes
                    .unwrap_or_default()
                    .into_iter()
                    .flatten()
                    .map(|node| IssueRef {
                        number: node.number,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
