//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - Optional YAML file
//! - GitHub runner environment (`GITHUB_TOKEN`, `GITHUB_API_URL`, ...)
//! - GitHub Action inputs (`INPUT_*`)
//! - `TRIAGE_*` overrides
//! - Configuration validation

pub mod loader;

pub use loader::{AppConfig, ConfigError, ConfigLoader, GitHubConfig};
