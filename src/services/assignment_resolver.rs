//! Copy assignees from a designated issue onto unassigned pull requests.

use crate::domain::errors::{TriageError, TriageResult};
use crate::domain::models::{AssigneeDecision, AssignmentPlan, Item, Settings};

/// Parse the configured source issue.
///
/// `Ok(None)` when the setting is empty, an error when it is set but not a
/// positive integer.
pub fn source_issue_number(settings: &Settings) -> TriageResult<Option<u64>> {
    let raw = settings.pr_assignee_from_issue.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<u64>() {
        Ok(number) if number > 0 => Ok(Some(number)),
        _ => Err(TriageError::Configuration(format!(
            "pr-assignee-from-issue must be a positive issue number, got: '{raw}'"
        ))),
    }
}

/// Decide whether the item should receive assignees from the source issue.
pub fn plan(settings: &Settings, item: &Item) -> TriageResult<AssignmentPlan> {
    let Some(source) = source_issue_number(settings)? else {
        return Ok(AssignmentPlan::Skip("no source issue configured"));
    };
    if !item.is_pull_request() {
        return Ok(AssignmentPlan::Skip("item is not a pull request"));
    }
    if !item.assignees.is_empty() {
        return Ok(AssignmentPlan::Skip("pull request already has assignees"));
    }
    Ok(AssignmentPlan::CopyFrom(source))
}

/// Assignees to add to `target`, or `None` when the source has none.
pub fn resolve(target: &Item, source: &Item) -> Option<AssigneeDecision> {
    if source.assignees.is_empty() {
        return None;
    }
    Some(AssigneeDecision {
        target: target.number,
        assignees: source.assignees.clone(),
    })
}
