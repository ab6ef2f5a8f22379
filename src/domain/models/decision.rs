//! Decisions produced by the pure triage components.
//!
//! None of these perform I/O; the orchestrator turns them into calls
//! against the GitHub port.

use serde::{Deserialize, Serialize};

/// Contributor category derived from an author association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Classification {
    /// Not a member, collaborator or unaffiliated account.
    pub is_community_contributor: bool,
    /// First contribution to this repository.
    pub is_first_time_contributor: bool,
}

/// Whether to post a new welcome comment or rewrite the existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CommentDecision {
    /// No marked comment exists yet.
    Create {
        /// Full comment body.
        body: String,
    },
    /// Replace the body of the previously posted comment.
    Update {
        /// Identifier of the marked comment.
        comment_id: u64,
        /// Full replacement body.
        body: String,
    },
}

/// A label transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "label", rename_all = "snake_case")]
pub enum LabelDecision {
    /// Ensure the label is applied.
    Add(String),
    /// Ensure the label is absent; a missing label is not an error.
    Remove(String),
}

impl LabelDecision {
    /// Name of the label this decision touches.
    pub fn label(&self) -> &str {
        match self {
            Self::Add(name) | Self::Remove(name) => name,
        }
    }
}

/// What the assignment step should do before any network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentPlan {
    /// Preconditions do not hold; nothing to do.
    Skip(&'static str),
    /// Fetch this issue and copy its assignees.
    CopyFrom(u64),
}

/// Assignees to add to the target item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssigneeDecision {
    /// Item receiving the assignees.
    pub target: u64,
    /// Logins to add.
    pub assignees: Vec<String>,
}
