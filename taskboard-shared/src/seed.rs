/// Static seed fixtures
///
/// When the remote API cannot be reached on startup, the client replaces its
/// boards, tasks and logs with these collections so the UI still has data to
/// show. The demo accounts in [`seed_users`] own and share the seed boards.
///
/// Every call builds fresh values; the fixtures are deterministic.
///
/// # Example
///
/// ```
/// use taskboard_shared::seed::{seed_boards, seed_tasks};
///
/// let boards = seed_boards();
/// assert!(seed_tasks().iter().all(|t| boards.iter().any(|b| b.id == t.board_id)));
/// ```

use chrono::{DateTime, TimeZone, Utc};

use crate::models::board::{default_columns, Board, COLUMN_DONE, COLUMN_IN_PROGRESS, COLUMN_TODO};
use crate::models::{Log, Task, User};

/// Password of every demo account
pub const SEED_PASSWORD: &str = "demo1234";

/// Email of the demo account that owns the shared board
pub const SEED_OWNER_EMAIL: &str = "demo@taskboard.dev";

/// Email of the demo account that is a member of the shared board
pub const SEED_MEMBER_EMAIL: &str = "alex@taskboard.dev";

fn at(day: u32, hour: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).single()
}

/// Demo accounts referenced by the seed boards
pub fn seed_users() -> Vec<User> {
    vec![
        User::new("Demo User", SEED_OWNER_EMAIL),
        User::new("Alex Kim", SEED_MEMBER_EMAIL),
    ]
}

/// Seed boards
///
/// - `board1`: owned by the demo owner, shared with the demo member
/// - `board2`: private board of the demo member
pub fn seed_boards() -> Vec<Board> {
    let mut launch = Board::draft("Product Launch").with_member(SEED_MEMBER_EMAIL);
    launch.id = "board1".to_string();
    launch.description = Some("Tasks for the spring release".to_string());
    launch.columns = default_columns();
    launch.created_by = SEED_OWNER_EMAIL.to_string();
    launch.created_by_name = "Demo User".to_string();
    launch.created_at = at(15, 9);

    let mut personal = Board::draft("Personal");
    personal.id = "board2".to_string();
    personal.columns = default_columns();
    personal.created_by = SEED_MEMBER_EMAIL.to_string();
    personal.created_by_name = "Alex Kim".to_string();
    personal.created_at = at(16, 10);

    vec![launch, personal]
}

/// Seed tasks for the seed boards
pub fn seed_tasks() -> Vec<Task> {
    let task = |id: &str, board_id: &str, column: &str, title: &str, day: u32| {
        let mut task = Task::new(board_id, title).with_id(id).in_column(column);
        task.created_at = at(day, 11);
        task
    };

    let mut announce = task("t1", "board1", COLUMN_TODO, "Write launch announcement", 15);
    announce.assignee = Some(SEED_OWNER_EMAIL.to_string());
    announce.priority = Some("high".to_string());
    announce.due_date = Some("2024-02-01".to_string());

    let mut qa = task("t2", "board1", COLUMN_IN_PROGRESS, "QA pass on checkout", 16);
    qa.assignee = Some(SEED_MEMBER_EMAIL.to_string());
    qa.priority = Some("medium".to_string());

    vec![
        announce,
        qa,
        task("t3", "board1", COLUMN_DONE, "Freeze feature list", 15),
        task("t4", "board2", COLUMN_TODO, "Renew passport", 16),
    ]
}

/// Seed logs, newest first
pub fn seed_logs() -> Vec<Log> {
    let log = |id: &str, board_id: &str, action: &str, user: &str, message: &str, day: u32, hour: u32| {
        let mut log = Log::new(board_id, action).with_user(user).with_message(message);
        log.id = id.to_string();
        log.timestamp = Utc
            .with_ymd_and_hms(2024, 1, day, hour, 0, 0)
            .single()
            .unwrap_or_default();
        log
    };

    vec![
        log("l3", "board2", "board_created", "Alex Kim", "Personal board created", 16, 10),
        log("l2", "board1", "task_moved", "Alex Kim", "QA pass on checkout moved to 진행 중", 16, 9),
        log("l1", "board1", "board_created", "Demo User", "Product Launch board created", 15, 9),
    ]
}
