/// In-memory persistence gateway for testing and demos
///
/// Behaves like a small REST backend held in process memory:
///
/// - creating an id that already exists answers `409`
/// - updating or deleting an unknown id answers `404`
/// - ids registered with [`MemoryPersistenceGateway::reject`] answer `500`
/// - while offline, every call fails with [`GatewayError::Offline`]
///
/// Every call is appended to a call log (`"create_board:board1"`), so tests
/// can assert what the client actually sent.
///
/// # Example
///
/// ```
/// use taskboard_client::gateways::{MemoryPersistenceGateway, PersistenceGateway};
/// use taskboard_shared::models::Task;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let gateway = MemoryPersistenceGateway::new();
/// gateway.create_task(&Task::new("board1", "Ship").with_id("t1")).await?;
///
/// assert_eq!(gateway.tasks().await.len(), 1);
/// assert_eq!(gateway.calls().await, vec!["create_task:t1"]);
/// # Ok(())
/// # }
/// ```

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use taskboard_shared::models::{Board, Log, Task};
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration};

use crate::error::{GatewayError, GatewayResult};
use crate::gateways::persistence::{EntityKind, PersistenceGateway};

#[derive(Debug, Default)]
struct Collections {
    boards: Vec<Board>,
    tasks: Vec<Task>,
    logs: Vec<Log>,
}

/// In-process persistence backend
#[derive(Debug, Default)]
pub struct MemoryPersistenceGateway {
    data: Mutex<Collections>,
    rejected: Mutex<HashSet<String>>,
    calls: Mutex<Vec<String>>,
    offline: AtomicBool,
    latency: Duration,
}

fn status(code: u16, kind: EntityKind, id: &str) -> GatewayError {
    GatewayError::Status {
        status: code,
        url: format!("memory://{}/{}", kind.collection(), id),
    }
}

/// Anything stored by id
trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Board {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Task {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Log {
    fn key(&self) -> &str {
        &self.id
    }
}

fn insert<T: Keyed + Clone>(items: &mut Vec<T>, item: &T, kind: EntityKind) -> GatewayResult<()> {
    if items.iter().any(|existing| existing.key() == item.key()) {
        return Err(status(409, kind, item.key()));
    }
    items.push(item.clone());
    Ok(())
}

fn replace<T: Keyed + Clone>(items: &mut [T], item: &T, kind: EntityKind) -> GatewayResult<()> {
    let slot = items
        .iter_mut()
        .find(|existing| existing.key() == item.key())
        .ok_or_else(|| status(404, kind, item.key()))?;
    *slot = item.clone();
    Ok(())
}

fn remove<T: Keyed>(items: &mut Vec<T>, id: &str, kind: EntityKind) -> GatewayResult<()> {
    let before = items.len();
    items.retain(|existing| existing.key() != id);
    if items.len() == before {
        return Err(status(404, kind, id));
    }
    Ok(())
}

impl MemoryPersistenceGateway {
    /// Creates an empty, online gateway without latency
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gateway pre-populated with collections
    pub fn with_data(boards: Vec<Board>, tasks: Vec<Task>, logs: Vec<Log>) -> Self {
        MemoryPersistenceGateway {
            data: Mutex::new(Collections {
                boards,
                tasks,
                logs,
            }),
            ..Self::default()
        }
    }

    /// Delays every call by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Switches the backend off or back on
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Makes every mutation of `id` fail with status 500
    pub async fn reject(&self, id: impl Into<String>) {
        self.rejected.lock().await.insert(id.into());
    }

    /// Snapshot of stored boards
    pub async fn boards(&self) -> Vec<Board> {
        self.data.lock().await.boards.clone()
    }

    /// Snapshot of stored tasks
    pub async fn tasks(&self) -> Vec<Task> {
        self.data.lock().await.tasks.clone()
    }

    /// Snapshot of stored logs
    pub async fn logs(&self) -> Vec<Log> {
        self.data.lock().await.logs.clone()
    }

    /// Calls received so far, in arrival order
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    /// Records the call, applies latency, then checks availability
    async fn enter(&self, operation: &str, id: Option<(EntityKind, &str)>) -> GatewayResult<()> {
        let entry = match id {
            Some((_, id)) => format!("{}:{}", operation, id),
            None => operation.to_string(),
        };
        self.calls.lock().await.push(entry);

        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }

        if self.offline.load(Ordering::SeqCst) {
            tracing::debug!(operation, "Memory gateway offline");
            return Err(GatewayError::Offline);
        }

        if let Some((kind, id)) = id {
            if self.rejected.lock().await.contains(id) {
                return Err(status(500, kind, id));
            }
        }

        Ok(())
    }
}

#[async_trait]
impl PersistenceGateway for MemoryPersistenceGateway {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_boards(&self) -> GatewayResult<Vec<Board>> {
        self.enter("fetch_boards", None).await?;
        Ok(self.boards().await)
    }

    async fn fetch_tasks(&self) -> GatewayResult<Vec<Task>> {
        self.enter("fetch_tasks", None).await?;
        Ok(self.tasks().await)
    }

    async fn fetch_logs(&self) -> GatewayResult<Vec<Log>> {
        self.enter("fetch_logs", None).await?;
        Ok(self.logs().await)
    }

    async fn create_board(&self, board: &Board) -> GatewayResult<()> {
        self.enter("create_board", Some((EntityKind::Board, board.id.as_str()))).await?;
        insert(&mut self.data.lock().await.boards, board, EntityKind::Board)
    }

    async fn update_board(&self, board: &Board) -> GatewayResult<()> {
        self.enter("update_board", Some((EntityKind::Board, board.id.as_str()))).await?;
        replace(&mut self.data.lock().await.boards, board, EntityKind::Board)
    }

    async fn delete_board(&self, board_id: &str) -> GatewayResult<()> {
        self.enter("delete_board", Some((EntityKind::Board, board_id))).await?;
        remove(&mut self.data.lock().await.boards, board_id, EntityKind::Board)
    }

    async fn create_task(&self, task: &Task) -> GatewayResult<()> {
        self.enter("create_task", Some((EntityKind::Task, task.id.as_str()))).await?;
        insert(&mut self.data.lock().await.tasks, task, EntityKind::Task)
    }

    async fn update_task(&self, task: &Task) -> GatewayResult<()> {
        self.enter("update_task", Some((EntityKind::Task, task.id.as_str()))).await?;
        replace(&mut self.data.lock().await.tasks, task, EntityKind::Task)
    }

    async fn delete_task(&self, task_id: &str) -> GatewayResult<()> {
        self.enter("delete_task", Some((EntityKind::Task, task_id))).await?;
        remove(&mut self.data.lock().await.tasks, task_id, EntityKind::Task)
    }

    async fn create_log(&self, log: &Log) -> GatewayResult<()> {
        self.enter("create_log", Some((EntityKind::Log, log.id.as_str()))).await?;
        insert(&mut self.data.lock().await.logs, log, EntityKind::Log)
    }

    async fn delete_log(&self, log_id: &str) -> GatewayResult<()> {
        self.enter("delete_log", Some((EntityKind::Log, log_id))).await?;
        remove(&mut self.data.lock().await.logs, log_id, EntityKind::Log)
    }
}
