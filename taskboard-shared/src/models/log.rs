/// Activity log model
///
/// Logs record what happened on a board. The client keeps them newest first
/// and removes them together with their board.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use uuid::Uuid;

/// Board activity entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    /// Unique log id
    pub id: String,

    /// Owning board id
    pub board_id: String,

    /// Short action label, e.g. `task_created`
    #[serde(default)]
    pub action: String,

    /// Acting user's display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    pub timestamp: DateTime<Utc>,

    /// Payload fields this client does not interpret
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Log {
    /// Creates a log stamped with the current time and a generated id
    pub fn new(board_id: impl Into<String>, action: impl Into<String>) -> Self {
        Log {
            id: format!("log-{}", Uuid::new_v4()),
            board_id: board_id.into(),
            action: action.into(),
            user: None,
            message: None,
            timestamp: Utc::now(),
            extra: Map::new(),
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
