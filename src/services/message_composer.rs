//! Welcome comment composition.
//!
//! The composed body is a fixed sequence of segments separated by blank
//! lines:
//!
//! ```text
//! Hi @login![ welcome clause]
//!
//! <issue or pull request template>
//!
//! [missing-issue warning]
//!
//! <!-- contributor-triage:welcome -->
//! ```
//!
//! The trailing marker is how later runs recognize the comment as their own.

use crate::domain::models::{ItemKind, Settings};

/// Sentinel embedded in every composed comment.
pub const OWNERSHIP_MARKER: &str = "<!-- contributor-triage:welcome -->";

/// Clause appended to the greeting for first-time contributors.
pub const WELCOME_CLAUSE: &str = " Welcome, and thank you for your first contribution to this project!";

const SEGMENT_SEPARATOR: &str = "\n\n";

/// Inputs for one welcome comment.
#[derive(Debug, Clone, Copy)]
pub struct MessageRequest<'a> {
    /// Login of the author being greeted.
    pub login: &'a str,
    /// Issue or pull request.
    pub kind: ItemKind,
    /// First contribution to this repository.
    pub first_time: bool,
    /// Result of the linked-issue check, `None` when it did not run.
    pub has_linked_issue: Option<bool>,
}

/// Builds welcome comment bodies from the configured templates.
#[derive(Debug, Clone, Copy)]
pub struct MessageComposer<'a> {
    settings: &'a Settings,
}

impl<'a> MessageComposer<'a> {
    /// Create a composer over the run's settings.
    pub const fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Compose the full comment body, always ending with [`OWNERSHIP_MARKER`].
    pub fn compose(&self, request: &MessageRequest<'_>) -> String {
        let mut greeting = format!("Hi @{}!", request.login);
        if request.first_time {
            greeting.push_str(WELCOME_CLAUSE);
        }

        let mut segments = vec![greeting, self.settings.template_for(request.kind).to_string()];

        if self.warns_missing_issue(request) {
            segments.push(self.settings.missing_issue_message.clone());
        }

        segments.push(OWNERSHIP_MARKER.to_string());
        segments.join(SEGMENT_SEPARATOR)
    }

    fn warns_missing_issue(&self, request: &MessageRequest<'_>) -> bool {
        request.kind == ItemKind::PullRequest
            && self.settings.warn_missing_issue
            && request.has_linked_issue == Some(false)
    }
}

/// Whether a comment body carries the ownership marker.
pub fn is_owned(body: &str) -> bool {
    body.contains(OWNERSHIP_MARKER)
}
