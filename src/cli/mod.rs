//! Command-line interface.
//!
//! Every argument falls back to the variable the Actions runner sets, so
//! the binary runs without flags inside a workflow.

pub mod output;
pub mod run;

use std::path::PathBuf;

use clap::Parser;

use crate::infrastructure::workflow_commands;

pub use output::{output, CommandOutput};
pub use run::execute;

/// Welcome and triage external contributors on GitHub issues and pull requests.
#[derive(Parser, Debug)]
#[command(name = "contributor-triage", version, about)]
pub struct Cli {
    /// Path to the webhook payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: PathBuf,

    /// Name of the triggering event
    #[arg(long, env = "GITHUB_EVENT_NAME", default_value = "")]
    pub event_name: String,

    /// `owner/name`, used when the payload has no repository object
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Read from GitHub but only log the writes
    #[arg(long)]
    pub dry_run: bool,

    /// Output in JSON format
    #[arg(short, long)]
    pub json: bool,
}

/// Report a failed run and exit with status 1.
pub fn handle_error(err: &anyhow::Error, json: bool) -> ! {
    workflow_commands::error(&format!("{err:#}"));
    if json {
        let value = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!("{}", serde_json::to_string_pretty(&value).unwrap_or_default());
    }
    std::process::exit(1)
}
