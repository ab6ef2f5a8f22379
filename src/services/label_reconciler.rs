//! Label transitions for the external-contributor and release-notes labels.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::errors::{TriageError, TriageResult};
use crate::domain::models::{Classification, LabelDecision, Settings};

/// A fenced block opened with the literal `release-notes` tag, captured
/// non-greedily up to the next fence.
static RELEASE_NOTES_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```release-notes(.*?)```").expect("release-notes pattern is valid")
});

/// Label to add for the author's classification.
///
/// There is no removal path: once applied, the label stays.
pub fn external_contributor_label(
    classification: Classification,
    settings: &Settings,
) -> TriageResult<Option<LabelDecision>> {
    if !classification.is_community_contributor {
        return Ok(None);
    }
    let label = non_empty_label(&settings.external_contributor_label, "external-contributor-label")?;
    Ok(Some(LabelDecision::Add(label.to_string())))
}

/// Trimmed contents of the first `release-notes` block, if any.
pub fn extract_release_notes(body: &str) -> Option<&str> {
    RELEASE_NOTES_BLOCK
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Whether the body declares release notes worth labelling.
///
/// A missing block, an empty block and a block reading `none` (any case)
/// all mean "no release notes".
pub fn wants_release_notes(body: &str) -> bool {
    extract_release_notes(body)
        .is_some_and(|notes| !notes.is_empty() && notes.to_uppercase() != "NONE")
}

/// Add or remove the release-notes label to match the body.
///
/// An empty label name is a configuration error; callers skip the step.
pub fn release_notes_label(body: &str, settings: &Settings) -> TriageResult<LabelDecision> {
    let label = non_empty_label(&settings.release_notes_label, "release-notes-label")?.to_string();
    if wants_release_notes(body) {
        Ok(LabelDecision::Add(label))
    } else {
        Ok(LabelDecision::Remove(label))
    }
}

fn non_empty_label<'a>(label: &'a str, key: &str) -> TriageResult<&'a str> {
    let label = label.trim();
    if label.is_empty() {
        return Err(TriageError::Configuration(format!("{key} is empty")));
    }
    Ok(label)
}
