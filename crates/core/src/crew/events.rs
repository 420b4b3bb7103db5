//! # Crew Events
//!
//! Progress records emitted while a crew runs. The UI renders them as status
//! lines under the spinner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of crew event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CrewEventKind {
    /// Agents initialised
    CrewStarted,
    /// Task list queued for execution
    TasksQueued,
    /// Agent started working on its task
    TaskStarted,
    /// Agent returned its answer
    TaskCompleted,
    /// Agent failed
    TaskFailed,
    /// All tasks completed
    CrewCompleted,
    /// Run aborted on a task failure
    CrewFailed,
}

/// An event in a crew run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub kind: CrewEventKind,
    /// Agent id, or "crew" for run-level events
    pub agent: String,
    /// Human-readable status line
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl CrewEvent {
    pub fn new(kind: CrewEventKind, agent: &str, message: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            kind,
            agent: agent.to_string(),
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_creation() {
        let event = CrewEvent::new(CrewEventKind::TaskStarted, "sales_strategy", "working")
            .with_data(serde_json::json!({"task": 2}));

        assert_eq!(event.agent, "sales_strategy");
        assert_eq!(event.data, Some(serde_json::json!({"task": 2})));
        assert_ne!(
            event.id,
            CrewEvent::new(CrewEventKind::TaskStarted, "x", "y").id
        );
    }

    #[test]
    fn test_event_kind_wire_name() {
        let json = serde_json::to_string(&CrewEventKind::CrewCompleted).unwrap();
        assert_eq!(json, "\"crew_completed\"");
        let json = serde_json::to_string(&CrewEventKind::TasksQueued).unwrap();
        assert_eq!(json, "\"tasks_queued\"");
    }
}
