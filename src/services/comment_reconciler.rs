//! Create-or-update decision for the welcome comment.

use crate::domain::models::{Comment, CommentDecision};

use super::message_composer::is_owned;

/// Decide whether `body` should be posted as a new comment or replace the
/// comment a previous run left behind.
///
/// The first comment carrying the ownership marker wins; its body is
/// replaced in full. Keeping to a single marked comment per item relies on
/// always choosing `Update` once one exists.
pub fn reconcile(existing: &[Comment], body: String) -> CommentDecision {
    match existing.iter().find(|comment| is_owned(&comment.body)) {
        Some(comment) => CommentDecision::Update {
            comment_id: comment.id,
            body,
        },
        None => CommentDecision::Create { body },
    }
}
