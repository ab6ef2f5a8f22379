//! Triage orchestrator.
//!
//! Runs the pure components in a fixed order for a single event and turns
//! their decisions into calls against the [`GitHubApi`] port:
//!
//! ```text
//! Start -> Classified -> Skip -> Done
//!                     -> Proceed -> [Commented] -> Labeled -> [Assigned]
//!                                -> [ReleaseNotesLabeled] -> Done
//! ```
//!
//! Calls are awaited one at a time. A failed call ends the run in `Failed`;
//! mutations already applied are left in place.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::errors::{TriageError, TriageResult};
use crate::domain::models::{
    AssignmentPlan, Classification, CommentDecision, LabelDecision, RepoRef, Settings,
    TriageEvent,
};
use crate::domain::ports::GitHubApi;

use super::message_composer::{MessageComposer, MessageRequest};
use super::{assignment_resolver, classifier, comment_reconciler, label_reconciler, linked_issue_check};

/// States a triage run passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriageState {
    /// Run started.
    Start,
    /// Author classified.
    Classified,
    /// Author is not a community contributor; nothing to do.
    Skip,
    /// Author is a community contributor.
    Proceed,
    /// Welcome comment created or updated.
    Commented,
    /// External-contributor label step finished.
    Labeled,
    /// Assignees copied from the source issue.
    Assigned,
    /// Release-notes label added or removed.
    ReleaseNotesLabeled,
    /// Run finished successfully.
    Done,
    /// Run aborted by an error.
    Failed,
}

/// What a run did, for logging and the `--json` output.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TriageReport {
    /// States visited, in order.
    pub states: Vec<TriageState>,
    /// Author classification.
    pub classification: Classification,
    /// Comment written, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<CommentDecision>,
    /// Result of the linked-issue query, if it ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_linked_issue: Option<bool>,
    /// Label transitions applied.
    pub labels: Vec<LabelDecision>,
    /// Assignees added.
    pub assignees: Vec<String>,
    /// Steps skipped because of configuration errors.
    pub warnings: Vec<String>,
}

impl TriageReport {
    fn enter(&mut self, state: TriageState) {
        debug!(state = ?state, "triage state");
        self.states.push(state);
    }

    /// Whether the run reached `Done`.
    pub fn is_done(&self) -> bool {
        self.states.last() == Some(&TriageState::Done)
    }
}

/// Sequences the triage components for one event.
pub struct TriageOrchestrator {
    github: Arc<dyn GitHubApi>,
    settings: Settings,
}

impl TriageOrchestrator {
    /// Create an orchestrator over a GitHub port and the run's settings.
    pub fn new(github: Arc<dyn GitHubApi>, settings: Settings) -> Self {
        Self { github, settings }
    }

    /// Triage a single event.
    #[instrument(
        skip(self, event),
        fields(repo = %event.repo, number = event.item.number, kind = %event.item.kind)
    )]
    pub async fn run(&self, event: &TriageEvent) -> TriageResult<TriageReport> {
        let mut report = TriageReport::default();
        match self.execute(event, &mut report).await {
            Ok(()) => {
                info!(states = ?report.states, "triage complete");
                Ok(report)
            }
            Err(err) => {
                report.enter(TriageState::Failed);
                error!(error = %err, states = ?report.states, "triage failed");
                Err(err)
            }
        }
    }

    async fn execute(&self, event: &TriageEvent, report: &mut TriageReport) -> TriageResult<()> {
        report.enter(TriageState::Start);

        let classification = classifier::classify(&event.actor.association);
        report.classification = classification;
        report.enter(TriageState::Classified);
        info!(
            login = %event.actor.login,
            association = %event.actor.association,
            community = classification.is_community_contributor,
            first_time = classification.is_first_time_contributor,
            "classified author"
        );

        if !classification.is_community_contributor {
            report.enter(TriageState::Skip);
            report.enter(TriageState::Done);
            return Ok(());
        }
        report.enter(TriageState::Proceed);

        if self.settings.replies_to(event.item.kind) {
            self.comment(event, classification, report).await?;
            report.enter(TriageState::Commented);
        } else {
            debug!(kind = %event.item.kind, "replies disabled for this kind of item");
        }

        self.label_external_contributor(event, classification, report)
            .await?;
        report.enter(TriageState::Labeled);

        if self.assign(event, report).await? {
            report.enter(TriageState::Assigned);
        }

        if self.label_release_notes(event, report).await? {
            report.enter(TriageState::ReleaseNotesLabeled);
        }

        report.enter(TriageState::Done);
        Ok(())
    }

    async fn comment(
        &self,
        event: &TriageEvent,
        classification: Classification,
        report: &mut TriageReport,
    ) -> TriageResult<()> {
        let repo = &event.repo;
        let item = &event.item;

        let has_linked_issue = if linked_issue_check::applies(&self.settings, item) {
            let linked = self.github.linked_issues(repo, item.number).await?;
            let found = linked_issue_check::has_linked_issue(&linked);
            info!(linked = linked.len(), "checked for linked issues");
            Some(found)
        } else {
            None
        };
        report.has_linked_issue = has_linked_issue;

        let body = MessageComposer::new(&self.settings).compose(&MessageRequest {
            login: &event.actor.login,
            kind: item.kind,
            first_time: classification.is_first_time_contributor,
            has_linked_issue,
        });

        let existing = self.github.list_comments(repo, item.number).await?;
        let decision = comment_reconciler::reconcile(&existing, body);

        match &decision {
            CommentDecision::Create { body } => {
                info!(body_len = body.len(), "creating welcome comment");
                self.github.create_comment(repo, item.number, body).await?;
            }
            CommentDecision::Update { comment_id, body } => {
                info!(comment_id, body_len = body.len(), "updating welcome comment");
                self.github.update_comment(repo, *comment_id, body).await?;
            }
        }

        report.comment = Some(decision);
        Ok(())
    }

    async fn label_external_contributor(
        &self,
        event: &TriageEvent,
        classification: Classification,
        report: &mut TriageReport,
    ) -> TriageResult<()> {
        match label_reconciler::external_contributor_label(classification, &self.settings) {
            Ok(Some(decision)) => {
                self.apply_label(&event.repo, event.item.number, &decision)
                    .await?;
                report.labels.push(decision);
            }
            Ok(None) => {}
            Err(err) => recover(report, "external-contributor label", err)?,
        }
        Ok(())
    }

    async fn assign(&self, event: &TriageEvent, report: &mut TriageReport) -> TriageResult<bool> {
        let source = match assignment_resolver::plan(&self.settings, &event.item) {
            Ok(AssignmentPlan::CopyFrom(source)) => source,
            Ok(AssignmentPlan::Skip(reason)) => {
                debug!(reason, "assignment skipped");
                return Ok(false);
            }
            Err(err) => {
                recover(report, "assignment", err)?;
                return Ok(false);
            }
        };

        let source_issue = self.github.get_issue(&event.repo, source).await?;
        let Some(decision) = assignment_resolver::resolve(&event.item, &source_issue) else {
            info!(source, "source issue has no assignees");
            return Ok(false);
        };

        info!(
            source,
            assignees = ?decision.assignees,
            "copying assignees from source issue"
        );
        self.github
            .add_assignees(&event.repo, decision.target, &decision.assignees)
            .await?;
        report.assignees = decision.assignees;
        Ok(true)
    }

    async fn label_release_notes(
        &self,
        event: &TriageEvent,
        report: &mut TriageReport,
    ) -> TriageResult<bool> {
        match label_reconciler::release_notes_label(event.item.body_text(), &self.settings) {
            Ok(decision) => {
                self.apply_label(&event.repo, event.item.number, &decision)
                    .await?;
                report.labels.push(decision);
                Ok(true)
            }
            Err(err) => {
                recover(report, "release-notes label", err)?;
                Ok(false)
            }
        }
    }

    async fn apply_label(
        &self,
        repo: &RepoRef,
        number: u64,
        decision: &LabelDecision,
    ) -> TriageResult<()> {
        let label = decision.label();
        match decision {
            LabelDecision::Add(_) => {
                info!(label, "adding label");
                self.github
                    .add_labels(repo, number, &[label.to_string()])
                    .await
            }
            LabelDecision::Remove(_) => {
                info!(label, "removing label");
                match self.github.remove_label(repo, number, label).await {
                    Err(TriageError::NotFound(_)) => {
                        debug!(label, "label was not applied");
                        Ok(())
                    }
                    other => other,
                }
            }
        }
    }
}

/// Skip a step on a recoverable error; any other error fails the run.
fn recover(report: &mut TriageReport, step: &str, err: TriageError) -> TriageResult<()> {
    if !err.is_recoverable() {
        return Err(err);
    }
    warn!(step, error = %err, "skipping step");
    report.warnings.push(format!("{step}: {err}"));
    Ok(())
}
