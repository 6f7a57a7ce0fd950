/// Board model
///
/// A board is a kanban workspace owned by the user who created it and
/// optionally shared with members. Every board created through the client
/// gets the same three columns.
///
/// # Access Rule
///
/// A user may open a board iff their email equals `createdBy` or appears in
/// `members`. See [`Board::is_accessible_by`].
///
/// # Wire Format
///
/// Fields use camelCase on the wire. Unknown fields are kept in `extra` and
/// written back unchanged.
///
/// ```json
/// {
///   "id": "board1",
///   "title": "Product Launch",
///   "columns": [{ "id": "todo", "title": "할 일", "color": "bg-slate-50 border-slate-200" }],
///   "createdBy": "demo@taskboard.dev",
///   "createdByName": "Demo User",
///   "createdAt": "2024-01-15T09:00:00Z",
///   "members": [{ "email": "alex@taskboard.dev" }]
/// }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Column id of the "to do" column
pub const COLUMN_TODO: &str = "todo";

/// Column id of the "in progress" column
pub const COLUMN_IN_PROGRESS: &str = "inProgress";

/// Column id of the "done" column
pub const COLUMN_DONE: &str = "done";

/// Board column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column id, referenced by `Task::column`
    pub id: String,

    /// Display title
    pub title: String,

    /// Style classes used by the renderer
    #[serde(default)]
    pub color: String,
}

impl Column {
    pub fn new(id: &str, title: &str, color: &str) -> Self {
        Column {
            id: id.to_string(),
            title: title.to_string(),
            color: color.to_string(),
        }
    }
}

/// Returns the fixed column set stamped on every new board
pub fn default_columns() -> Vec<Column> {
    vec![
        Column::new(COLUMN_TODO, "할 일", "bg-slate-50 border-slate-200"),
        Column::new(COLUMN_IN_PROGRESS, "진행 중", "bg-blue-50 border-blue-200"),
        Column::new(COLUMN_DONE, "완료", "bg-green-50 border-green-200"),
    ]
}

/// A user the board is shared with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Member email, compared against the current user's email
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Member {
    pub fn new(email: impl Into<String>) -> Self {
        Member {
            email: email.into(),
            name: None,
            avatar: None,
        }
    }
}

/// Kanban board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Unique board id
    pub id: String,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Ordered columns
    #[serde(default)]
    pub columns: Vec<Column>,

    /// Creator email
    #[serde(default)]
    pub created_by: String,

    /// Creator display name at creation time
    #[serde(default)]
    pub created_by_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Users the board is shared with
    #[serde(default)]
    pub members: Vec<Member>,

    /// Payload fields this client does not interpret
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Board {
    /// Creates an unsaved board carrying only a title
    ///
    /// Id, creator, timestamp and columns are assigned when the draft is
    /// saved as a new board.
    pub fn draft(title: impl Into<String>) -> Self {
        Board {
            id: String::new(),
            title: title.into(),
            description: None,
            columns: Vec::new(),
            created_by: String::new(),
            created_by_name: String::new(),
            created_at: None,
            members: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Adds a member by email
    pub fn with_member(mut self, email: impl Into<String>) -> Self {
        self.members.push(Member::new(email));
        self
    }

    /// Checks whether `email` is listed in `members`
    pub fn has_member(&self, email: &str) -> bool {
        self.members.iter().any(|member| member.email == email)
    }

    /// Checks whether `email` is the creator or a member
    pub fn is_accessible_by(&self, email: &str) -> bool {
        self.created_by == email || self.has_member(email)
    }
}
