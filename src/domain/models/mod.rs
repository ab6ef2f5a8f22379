//! Domain models for the contributor triage engine.

pub mod actor;
pub mod decision;
pub mod event;
pub mod item;
pub mod settings;

pub use actor::{Actor, AuthorAssociation};
pub use decision::{
    AssigneeDecision, AssignmentPlan, Classification, CommentDecision, LabelDecision,
};
pub use event::TriageEvent;
pub use item::{Comment, IssueRef, Item, ItemKind, LabelSet, RepoRef};
pub use settings::{Settings, LEGACY_KEYS};
