//! Human and JSON rendering of command results.

use serde::Serialize;

use crate::domain::models::{CommentDecision, LabelDecision};
use crate::services::TriageReport;

/// A result that can be printed for people or machines.
pub trait CommandOutput: Serialize {
    /// Plain-text summary.
    fn to_human(&self) -> String;
    /// JSON document.
    fn to_json(&self) -> serde_json::Value;
}

/// Print a result in the requested format.
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}

impl CommandOutput for TriageReport {
    fn to_human(&self) -> String {
        let mut lines = Vec::new();

        let category = match (
            self.classification.is_community_contributor,
            self.classification.is_first_time_contributor,
        ) {
            (false, _) => "maintainer (skipped)",
            (true, true) => "first-time contributor",
            (true, false) => "community contributor",
        };
        lines.push(format!("Author: {category}"));

        match &self.comment {
            Some(CommentDecision::Create { .. }) => lines.push("Comment: created".to_string()),
            Some(CommentDecision::Update { comment_id, .. }) => {
                lines.push(format!("Comment: updated #{comment_id}"));
            }
            None => {}
        }

        for label in &self.labels {
            match label {
                LabelDecision::Add(name) => lines.push(format!("Label: +{name}")),
                LabelDecision::Remove(name) => lines.push(format!("Label: -{name}")),
            }
        }

        if !self.assignees.is_empty() {
            lines.push(format!("Assigned: {}", self.assignees.join(", ")));
        }

        for warning in &self.warnings {
            lines.push(format!("Warning: {warning}"));
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Classification;

    #[test]
    fn test_human_summary() {
        let report = TriageReport {
            classification: Classification {
                is_community_contributor: true,
                is_first_time_contributor: true,
            },
            comment: Some(CommentDecision::Update {
                comment_id: 7,
                body: "hi".to_string(),
            }),
            labels: vec![
                LabelDecision::Add("external-contributor".to_string()),
                LabelDecision::Remove("release-notes".to_string()),
            ],
            assignees: vec!["maintainer".to_string()],
            ..TriageReport::default()
        };

        assert_eq!(
            report.to_human(),
            "Author: first-time contributor\nComment: updated #7\nLabel: +external-contributor\nLabel: -release-notes\nAssigned: maintainer"
        );
    }

    #[test]
    fn test_json_omits_absent_comment() {
        let json = TriageReport::default().to_json();
        assert!(json.get("comment").is_none());
        assert_eq!(json["labels"], serde_json::json!([]));
    }
}
