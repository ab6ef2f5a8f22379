//! GitHub HTTP client.
//!
//! Implements the [`GitHubApi`] port over the GitHub REST API v3 and the
//! GraphQL API v4. Base URLs are configurable so the client works against
//! GitHub Enterprise Server and against mock servers in tests.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::domain::errors::{TriageError, TriageResult};
use crate::domain::models::{Comment, IssueRef, Item, RepoRef};
use crate::domain::ports::GitHubApi;
use crate::services::linked_issue_check::LINKED_ISSUE_LIMIT;

use super::models::{
    GitHubAssigneesRequest, GitHubComment, GitHubCommentRequest, GitHubIssue,
    GitHubLabelsRequest, GraphQlRequest, GraphQlResponse, LinkedIssuesData,
    LinkedIssuesVariables, LINKED_ISSUES_QUERY,
};

/// Default base URL for the GitHub REST API v3.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default endpoint for the GitHub GraphQL API.
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// Comments requested per page when listing.
const COMMENTS_PER_PAGE: usize = 100;

/// Connection settings for [`GitHubClient`].
#[derive(Clone)]
pub struct GitHubClientConfig {
    /// Personal access token or `GITHUB_TOKEN`.
    pub token: String,
    /// REST base URL.
    pub api_url: String,
    /// GraphQL endpoint.
    pub graphql_url: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for GitHubClientConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            timeout_secs: 30,
            user_agent: concat!("contributor-triage/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl fmt::Debug for GitHubClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClientConfig")
            .field("token", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .field("graphql_url", &self.graphql_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// HTTP client for the GitHub REST and GraphQL APIs.
///
/// All methods map network errors and non-success statuses to
/// [`TriageError::ExternalCall`].
#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    token: String,
    api_url: Url,
    graphql_url: Url,
}

impl fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_url", &self.api_url.as_str())
            .field("graphql_url", &self.graphql_url.as_str())
            .finish_non_exhaustive()
    }
}

impl GitHubClient {
    /// Build a client from its configuration.
    pub fn new(config: GitHubClientConfig) -> TriageResult<Self> {
        if config.token.trim().is_empty() {
            return Err(TriageError::Configuration(
                "github-token is empty".to_string(),
            ));
        }
        let api_url = parse_url(&config.api_url, "api_url")?;
        let graphql_url = parse_url(&config.graphql_url, "graphql_url")?;

        let http = Client::builder()
            .user_agent(config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TriageError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            token: config.token,
            api_url,
            graphql_url,
        })
    }

    /// Build a REST URL from path segments, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> TriageResult<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                TriageError::Configuration(format!("{} cannot be used as a base URL", self.api_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn issue_endpoint(&self, repo: &RepoRef, number: u64, tail: &[&str]) -> TriageResult<Url> {
        let number = number.to_string();
        let mut segments = vec![
            "repos",
            repo.owner.as_str(),
            repo.name.as_str(),
            "issues",
            number.as_str(),
        ];
        segments.extend_from_slice(tail);
        self.endpoint(&segments)
    }

    /// Build an authorized request.
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    /// Send a request and fail on transport errors and non-success statuses.
    async fn execute(&self, operation: &str, request: RequestBuilder) -> TriageResult<Response> {
        let resp = request
            .send()
            .await
            .map_err(|e| TriageError::external(operation, format!("request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(status_error(operation, resp).await);
        }
        Ok(resp)
    }

    async fn parse<T: DeserializeOwned>(operation: &str, resp: Response) -> TriageResult<T> {
        resp.json::<T>()
            .await
            .map_err(|e| TriageError::external(operation, format!("parse failed: {e}")))
    }
}

async fn status_error(operation: &str, resp: Response) -> TriageError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    TriageError::external(operation, format!("returned {status}: {body}"))
}

fn parse_url(raw: &str, field: &str) -> TriageResult<Url> {
    Url::parse(raw).map_err(|e| TriageError::Configuration(format!("invalid {field} '{raw}': {e}")))
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn list_comments(&self, repo: &RepoRef, number: u64) -> TriageResult<Vec<Comment>> {
        let mut comments = Vec::new();
        let mut page = 1_u32;

        loop {
            let mut url = self.issue_endpoint(repo, number, &["comments"])?;
            url.query_pairs_mut()
                .append_pair("per_page", &COMMENTS_PER_PAGE.to_string())
                .append_pair("page", &page.to_string());

            let resp = self
                .execute("list_comments", self.request(Method::GET, url))
                .await?;
            let batch: Vec<GitHubComment> = Self::parse("list_comments", resp).await?;
            let last_page = batch.len() < COMMENTS_PER_PAGE;
            comments.extend(batch.into_iter().map(Comment::from));

            if last_page {
                break;
            }
            page += 1;
        }

        tracing::debug!(number, count = comments.len(), "listed comments");
        Ok(comments)
    }

    async fn create_comment(&self, repo: &RepoRef, number: u64, body: &str) -> TriageResult<()> {
        let url = self.issue_endpoint(repo, number, &["comments"])?;
        let payload = GitHubCommentRequest {
            body: body.to_string(),
        };
        self.execute(
            "create_comment",
            self.request(Method::POST, url).json(&payload),
        )
        .await?;
        Ok(())
    }

    async fn update_comment(
        &self,
        repo: &RepoRef,
        comment_id: u64,
        body: &str,
    ) -> TriageResult<()> {
        let comment_id = comment_id.to_string();
        let url = self.endpoint(&[
            "repos",
            repo.owner.as_str(),
            repo.name.as_str(),
            "issues",
            "comments",
            comment_id.as_str(),
        ])?;
        let payload = GitHubCommentRequest {
            body: body.to_string(),
        };
        self.execute(
            "update_comment",
            self.request(Method::PATCH, url).json(&payload),
        )
        .await?;
        Ok(())
    }

    async fn add_labels(
        &self,
        repo: &RepoRef,
        number: u64,
        labels: &[String],
    ) -> TriageResult<()> {
        let url = self.issue_endpoint(repo, number, &["labels"])?;
        let payload = GitHubLabelsRequest {
            labels: labels.to_vec(),
        };
        self.execute("add_labels", self.request(Method::POST, url).json(&payload))
            .await?;
        Ok(())
    }

    async fn remove_label(&self, repo: &RepoRef, number: u64, label: &str) -> TriageResult<()> {
        let url = self.issue_endpoint(repo, number, &["labels", label])?;
        let resp = self
            .request(Method::DELETE, url)
            .send()
            .await
            .map_err(|e| TriageError::external("remove_label", format!("request failed: {e}")))?;

        match resp.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(TriageError::NotFound(format!(
                "label '{label}' on #{number}"
            ))),
            _ => Err(status_error("remove_label", resp).await),
        }
    }

    async fn get_issue(&self, repo: &RepoRef, number: u64) -> TriageResult<Item> {
        let url = self.issue_endpoint(repo, number, &[])?;
        let resp = self
            .execute("get_issue", self.request(Method::GET, url))
            .await?;
        let issue: GitHubIssue = Self::parse("get_issue", resp).await?;
        let kind = issue.kind();
        Ok(issue.into_item(kind))
    }

    async fn add_assignees(
        &self,
        repo: &RepoRef,
        number: u64,
        assignees: &[String],
    ) -> TriageResult<()> {
        let url = self.issue_endpoint(repo, number, &["assignees"])?;
        let payload = GitHubAssigneesRequest {
            assignees: assignees.to_vec(),
        };
        self.execute(
            "add_assignees",
            self.request(Method::POST, url).json(&payload),
        )
        .await?;
        Ok(())
    }

    async fn linked_issues(&self, repo: &RepoRef, pr_number: u64) -> TriageResult<Vec<IssueRef>> {
        let payload = GraphQlRequest {
            query: LINKED_ISSUES_QUERY,
            variables: LinkedIssuesVariables {
                owner: repo.owner.clone(),
                repo: repo.name.clone(),
                number: pr_number,
                first: LINKED_ISSUE_LIMIT,
            },
        };
        let resp = self
            .execute(
                "linked_issues",
                self.request(Method::POST, self.graphql_url.clone())
                    .json(&payload),
            )
            .await?;
        let body: GraphQlResponse<LinkedIssuesData> = Self::parse("linked_issues", resp).await?;

        if !body.errors.is_empty() {
            let messages: Vec<_> = body.errors.into_iter().map(|e| e.message).collect();
            return Err(TriageError::external("linked_issues", messages.join("; ")));
        }
        let data = body
            .data
            .ok_or_else(|| TriageError::external("linked_issues", "response has no data"))?;

        let mut refs = data.into_refs();
        refs.truncate(LINKED_ISSUE_LIMIT);
        Ok(refs)
    }
}
