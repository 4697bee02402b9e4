//! Task list filtering by name and state

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cylc task states
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    Waiting,
    Preparing,
    Submitted,
    Running,
    Succeeded,
    Failed,
    SubmitFailed,
    Expired,
}

impl TaskState {
    pub const ALL: [TaskState; 8] = [
        TaskState::Waiting,
        TaskState::Preparing,
        TaskState::Submitted,
        TaskState::Running,
        TaskState::Succeeded,
        TaskState::Failed,
        TaskState::SubmitFailed,
        TaskState::Expired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Waiting => "waiting",
            TaskState::Preparing => "preparing",
            TaskState::Submitted => "submitted",
            TaskState::Running => "running",
            TaskState::Succeeded => "succeeded",
            TaskState::Failed => "failed",
            TaskState::SubmitFailed => "submit-failed",
            TaskState::Expired => "expired",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        TaskState::ALL
            .iter()
            .copied()
            .find(|state| state.as_str() == wanted)
            .ok_or_else(|| format!("unknown task state '{}'", s))
    }
}

/// One row of the task table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRow {
    pub name: String,
    pub state: TaskState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_point: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub states: Vec<TaskState>,
}

impl TaskFilter {
    fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// Whether any criterion is set
    pub fn is_active(&self) -> bool {
        self.name().is_some() || !self.states.is_empty()
    }

    pub fn matches(&self, row: &TaskRow) -> bool {
        let name_ok = self.name().map_or(true, |n| row.name.contains(n));
        let state_ok = self.states.is_empty() || self.states.contains(&row.state);
        name_ok && state_ok
    }
}

/// Rows passing the filter, in their original order
pub fn filter_tasks<'a>(rows: &'a [TaskRow], filter: &TaskFilter) -> Vec<&'a TaskRow> {
    if !filter.is_active() {
        return rows.iter().collect();
    }
    let kept: Vec<_> = rows.iter().filter(|row| filter.matches(row)).collect();
    tracing::debug!(total = rows.len(), kept = kept.len(), "Filtered tasks");
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, state: TaskState) -> TaskRow {
        TaskRow {
            name: name.to_string(),
            state,
            cycle_point: Some("20000102T0000Z".to_string()),
        }
    }

    fn rows() -> Vec<TaskRow> {
        vec![
            row("taskA", TaskState::Running),
            row("taskB", TaskState::Waiting),
            row("taskC", TaskState::Submitted),
        ]
    }

    #[test]
    fn test_no_filter_keeps_everything() {
        let rows = rows();
        assert_eq!(filter_tasks(&rows, &TaskFilter::default()).len(), 3);

        let empty_name = TaskFilter {
            name: Some(String::new()),
            states: vec![],
        };
        assert!(!empty_name.is_active());
        assert_eq!(filter_tasks(&rows, &empty_name).len(), 3);
    }

    #[test]
    fn test_filter_by_name() {
        let rows = rows();
        let filter = TaskFilter {
            name: Some("taskA".into()),
            states: vec![],
        };
        let kept = filter_tasks(&rows, &filter);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "taskA");
    }

    #[test]
    fn test_filter_by_state() {
        let rows = rows();
        let filter = TaskFilter {
            name: Some(String::new()),
            states: vec![TaskState::Waiting],
        };
        assert_eq!(filter_tasks(&rows, &filter).len(), 1);
    }

    #[test]
    fn test_filter_by_name_and_state() {
        let rows = rows();
        let filter = TaskFilter {
            name: Some("taskA".into()),
            states: vec![TaskState::Waiting],
        };
        assert!(filter_tasks(&rows, &filter).is_empty());
    }

    #[test]
    fn test_name_is_case_sensitive_substring() {
        let rows = vec![row("sleepy", TaskState::Running), row("eager", TaskState::Running)];
        let filter = TaskFilter {
            name: Some("eep".into()),
            states: vec![],
        };
        let kept = filter_tasks(&rows, &filter);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "sleepy");

        let upper = TaskFilter {
            name: Some("EEP".into()),
            states: vec![],
        };
        assert!(filter_tasks(&rows, &upper).is_empty());
    }

    #[test]
    fn test_state_names() {
        assert_eq!("submit-failed".parse::<TaskState>(), Ok(TaskState::SubmitFailed));
        assert_eq!("SUBMIT_FAILED".parse::<TaskState>(), Ok(TaskState::SubmitFailed));
        assert!("exploded".parse::<TaskState>().is_err());
        let json = serde_json::to_string(&TaskState::SubmitFailed).unwrap();
        assert_eq!(json, "\"submit-failed\"");
    }
}
