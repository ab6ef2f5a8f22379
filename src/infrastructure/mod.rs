//! Infrastructure layer module
//!
//! Process-level concerns around the triage engine:
//! - Configuration management
//! - Logging infrastructure
//! - Webhook event intake
//! - GitHub Actions workflow commands

pub mod config;
pub mod event_source;
pub mod logging;
pub mod workflow_commands;
