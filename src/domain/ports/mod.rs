//! Port trait definitions (Hexagonal Architecture)
//!
//! - GitHubApi: comments, labels, assignees and the linked-issue query

pub mod github;

pub use github::GitHubApi;
