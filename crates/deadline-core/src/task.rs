//! Task checklist model and the plain-text export report.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One checklist entry. Text has no uniqueness constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub text: String,
    pub done: bool,
}

/// Format the completed/uncompleted report for a task list.
pub fn export_report(tasks: &[Task]) -> String {
    let completed: Vec<&str> = tasks
        .iter()
        .filter(|t| t.done)
        .map(|t| t.text.as_str())
        .collect();
    let uncompleted: Vec<&str> = tasks
        .iter()
        .filter(|t| !t.done)
        .map(|t| t.text.as_str())
        .collect();

    let mut content = String::from("--- Completed Tasks ---\n");
    content.push_str(&join_or_none(&completed));
    content.push_str("\n\n--- Uncompleted Tasks ---\n");
    content.push_str(&join_or_none(&uncompleted));
    content
}

fn join_or_none(lines: &[&str]) -> String {
    if lines.is_empty() {
        "(None)".to_string()
    } else {
        lines.join("\n")
    }
}

/// Default export file name: `YYYY-MM-DD_HH-MM-SS.txt` in local time.
pub fn export_filename(now: DateTime<Local>) -> String {
    now.format("%Y-%m-%d_%H-%M-%S.txt").to_string()
}
