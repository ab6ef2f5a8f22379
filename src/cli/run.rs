//! A single triage run, from the runner environment to the step output.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::adapters::github::{DryRunGitHub, GitHubClient};
use crate::domain::errors::TriageResult;
use crate::domain::models::{Settings, TriageEvent};
use crate::domain::ports::GitHubApi;
use crate::infrastructure::config::{ConfigLoader, GitHubConfig};
use crate::infrastructure::event_source::{self, ActionContext};
use crate::infrastructure::logging::LoggerImpl;
use crate::infrastructure::workflow_commands;
use crate::services::{TriageOrchestrator, TriageReport};

use super::Cli;

/// Step output set when a run succeeds.
pub const TIME_OUTPUT: &str = "time";

/// Run triage for the event described by `cli`.
pub async fn execute(cli: &Cli) -> Result<TriageReport> {
    let config = ConfigLoader::load(cli.config.as_deref())?;
    let _logger = LoggerImpl::init(&config.logging)?;

    ActionContext::from_env().log();

    let event = load_event(&cli.event_path, &cli.event_name, cli.repository.as_deref())?;
    let github = connect(&config.github, cli.dry_run)?;
    let report = triage(github, config.settings, &event).await?;

    let finished = chrono::Utc::now().format("%H:%M:%S UTC").to_string();
    if workflow_commands::set_output(TIME_OUTPUT, &finished).context("Failed to set step output")? {
        info!(time = %finished, "set step output");
    }

    Ok(report)
}

/// Read a payload file and normalize it.
pub fn load_event(path: &Path, name: &str, repository: Option<&str>) -> TriageResult<TriageEvent> {
    let payload = event_source::read_event(path)?;
    event_source::triage_event(name, payload, repository)
}

/// Build the GitHub port, wrapping it when writes should only be logged.
pub fn connect(config: &GitHubConfig, dry_run: bool) -> TriageResult<Arc<dyn GitHubApi>> {
    let client: Arc<dyn GitHubApi> = Arc::new(GitHubClient::new(config.client_config())?);
    if dry_run {
        info!("dry run: writes will be logged, not sent");
        return Ok(Arc::new(DryRunGitHub::new(client)));
    }
    Ok(client)
}

/// Run the state machine for one event.
pub async fn triage(
    github: Arc<dyn GitHubApi>,
    settings: Settings,
    event: &TriageEvent,
) -> TriageResult<TriageReport> {
    TriageOrchestrator::new(github, settings).run(event).await
}
