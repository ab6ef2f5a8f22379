//! Service layer: the triage decision engine.
//!
//! Every component except the orchestrator is pure. The orchestrator is
//! the only place that talks to the [`GitHubApi`](crate::domain::ports::GitHubApi) port.

pub mod assignment_resolver;
pub mod classifier;
pub mod comment_reconciler;
pub mod label_reconciler;
pub mod linked_issue_check;
pub mod message_composer;
pub mod triage_orchestrator;

pub use message_composer::{MessageComposer, MessageRequest, OWNERSHIP_MARKER};
pub use triage_orchestrator::{TriageOrchestrator, TriageReport, TriageState};
