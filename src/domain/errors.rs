//! Domain errors for the contributor triage engine.

use thiserror::Error;

/// Errors that can occur while triaging a single event.
///
/// Only [`TriageError::Configuration`] and [`TriageError::NotFound`] are
/// recoverable inside a run; every other variant aborts the run at the
/// top-level boundary.
#[derive(Debug, Error)]
pub enum TriageError {
    /// A setting is present but unusable (e.g. a non-numeric source issue).
    /// The dependent step is skipped and the run continues.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The event carries neither an issue nor a pull request.
    #[error("Event payload contains neither an issue nor a pull request")]
    MissingPayload,

    /// The event payload could not be read or understood.
    #[error("Invalid event payload: {0}")]
    InvalidPayload(String),

    /// A call against the external API failed.
    #[error("GitHub {operation} failed: {message}")]
    ExternalCall {
        /// Capability that failed, e.g. `add_labels`.
        operation: String,
        /// Transport or API error detail.
        message: String,
    },

    /// The targeted remote resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl TriageError {
    /// Build an [`TriageError::ExternalCall`] for the named operation.
    pub fn external(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalCall {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Whether this error may be recovered locally without failing the run.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::NotFound(_))
    }
}

/// Result alias used throughout the domain and service layers.
pub type TriageResult<T> = Result<T, TriageError>;

impl From<serde_json::Error> for TriageError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidPayload(err.to_string())
    }
}
