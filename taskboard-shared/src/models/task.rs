/// Task model
///
/// A task is a card on a board. It belongs to exactly one board through
/// `boardId` and sits in one of that board's columns. Tasks are removed
/// together with their board.
///
/// # Example
///
/// ```
/// use taskboard_shared::models::task::Task;
///
/// let task = Task::new("board1", "Write release notes");
/// assert_eq!(task.column, "todo");
/// assert!(task.id.starts_with("task-"));
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use uuid::Uuid;

use super::board::COLUMN_TODO;

fn default_column() -> String {
    COLUMN_TODO.to_string()
}

/// Kanban task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task id
    pub id: String,

    /// Owning board id
    pub board_id: String,

    /// Column id within the owning board
    #[serde(default = "default_column")]
    pub column: String,

    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Assignee email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,

    /// Due date as sent by the API (`YYYY-MM-DD`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Payload fields this client does not interpret
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Task {
    /// Creates a task in the `todo` column with a generated id
    pub fn new(board_id: impl Into<String>, title: impl Into<String>) -> Self {
        Task {
            id: format!("task-{}", Uuid::new_v4()),
            board_id: board_id.into(),
            column: default_column(),
            title: title.into(),
            description: None,
            assignee: None,
            priority: None,
            due_date: None,
            created_at: Some(Utc::now()),
            extra: Map::new(),
        }
    }

    /// Overrides the generated id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Places the task in another column
    pub fn in_column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new("board1", "Draft");
        assert_eq!(task.board_id, "board1");
        assert_eq!(task.column, COLUMN_TODO);
        assert!(task.created_at.is_some());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = Task::new("board1", "A");
        let b = Task::new("board1", "B");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_minimal_payload_deserializes() {
        let task: Task =
            serde_json::from_str(r#"{"id":"t1","boardId":"board1","tags":["ui"]}"#).unwrap();

        assert_eq!(task.column, "todo");
        assert_eq!(task.title, "");
        assert_eq!(task.extra["tags"][0], "ui");
    }

    #[test]
    fn test_builder_helpers() {
        let task = Task::new("board1", "Ship").with_id("t9").in_column("done");

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], "t9");
        assert_eq!(json["boardId"], "board1");
        assert_eq!(json["column"], "done");
        assert!(json.get("assignee").is_none());
    }
}
