//! Actions: server-side asynchronous operations
//!
//! Mutating calls return the action that tracks them. Inline actions arrive
//! complete and are never fetched implicitly; `Resource::refresh` polls the
//! current status.

use crate::resource::{Entity, Identified};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Running,
    Success,
    Error,
}

/// A resource an action operates on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResource {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionError {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Action {
    pub id: u64,
    pub command: Option<String>,
    pub status: Option<ActionStatus>,
    /// Completion percentage, 0 to 100
    pub progress: Option<u8>,
    pub started: Option<DateTime<Utc>>,
    pub finished: Option<DateTime<Utc>>,
    pub resources: Vec<ActionResource>,
    pub error: Option<ActionError>,
}

impl Action {
    pub fn is_running(&self) -> bool {
        self.status == Some(ActionStatus::Running)
    }

    /// True once the action succeeded or failed
    pub fn is_finished(&self) -> bool {
        matches!(self.status, Some(ActionStatus::Success | ActionStatus::Error))
    }

    pub fn is_error(&self) -> bool {
        self.status == Some(ActionStatus::Error)
    }
}

impl Entity for Action {
    const KIND: &'static str = "Action";
    const COLLECTION: &'static str = "actions";
    const ITEM_PATH: &'static str = "actions/{id}";
    const SINGULAR: &'static str = "action";

    fn label(&self) -> String {
        match &self.command {
            Some(command) => format!("{} ({})", command, self.id),
            None => self.id.to_string(),
        }
    }
}

impl Identified for Action {
    fn id(&self) -> u64 {
        self.id
    }

    fn with_id(id: u64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_action() {
        let action: Action = serde_json::from_value(json!({
            "id": 13,
            "command": "start_server",
            "status": "success",
            "progress": 100,
            "started": "2016-01-30T23:55:00+00:00",
            "finished": "2016-01-30T23:56:00+00:00",
            "resources": [{"id": 42, "type": "server"}],
            "error": null
        }))
        .unwrap();

        assert_eq!(action.status, Some(ActionStatus::Success));
        assert!(action.is_finished());
        assert!(!action.is_error());
        assert_eq!(action.resources[0].kind, "server");
        assert_eq!(action.label(), "start_server (13)");
        assert!(action.finished.unwrap() > action.started.unwrap());
    }

    #[test]
    fn test_failed_action() {
        let action: Action = serde_json::from_value(json!({
            "id": 14,
            "status": "error",
            "error": {"code": "action_failed", "message": "Action failed"}
        }))
        .unwrap();

        assert!(action.is_error());
        assert_eq!(action.error.unwrap().code, "action_failed");
    }
}
