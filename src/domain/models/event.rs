use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::item::{Item, RepoRef};

/// A normalized issue or pull request event, ready for triage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageEvent {
    /// Webhook event name (e.g. `pull_request_target`), informational only.
    pub name: String,
    /// Repository the item lives in.
    pub repo: RepoRef,
    /// Author of the item.
    pub actor: Actor,
    /// The issue or pull request.
    pub item: Item,
}

impl TriageEvent {
    /// Create an event.
    pub fn new(name: impl Into<String>, repo: RepoRef, actor: Actor, item: Item) -> Self {
        Self {
            name: name.into(),
            repo,
            actor,
            item,
        }
    }
}
