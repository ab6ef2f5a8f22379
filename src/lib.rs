//! Contributor triage for GitHub issues and pull requests.
//!
//! Runs once per webhook event inside a GitHub Actions job. Authors who are
//! not maintainers get a welcome comment (kept as a single, updatable
//! comment), an external-contributor label, assignees copied from the issue
//! a pull request references, and a release-notes label that tracks whether
//! the body carries a release-notes block.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, errors and the `GitHubApi` port
//! - **Service Layer** (`services`): pure decision logic and the orchestrator
//! - **Adapters** (`adapters`): REST/GraphQL client, dry-run and in-memory ports
//! - **Infrastructure Layer** (`infrastructure`): config, logging, event intake
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use contributor_triage::{MockGitHub, Settings, TriageOrchestrator};
//!
//! let orchestrator = TriageOrchestrator::new(Arc::new(MockGitHub::new()), Settings::default());
//! let report = orchestrator.run(&event).await?;
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::github::{DryRunGitHub, GitHubClient, GitHubClientConfig, MockGitHub};
pub use domain::models::{
    Actor, AuthorAssociation, Classification, Comment, CommentDecision, IssueRef, Item, ItemKind,
    LabelDecision, RepoRef, Settings, TriageEvent,
};
pub use domain::ports::GitHubApi;
pub use domain::{TriageError, TriageResult};
pub use infrastructure::config::{AppConfig, ConfigError, ConfigLoader};
pub use services::{TriageOrchestrator, TriageReport, TriageState};
