//! GitHub adapters.
//!
//! `client` talks to the real REST and GraphQL APIs, `dry_run` wraps any
//! port and suppresses writes, and `mock` keeps everything in memory for
//! tests.

pub mod client;
pub mod dry_run;
pub mod mock;
pub mod models;

pub use client::{GitHubClient, GitHubClientConfig};
pub use dry_run::DryRunGitHub;
pub use mock::MockGitHub;
