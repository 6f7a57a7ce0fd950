/// Persistence gateway contract
///
/// The client never owns durable storage. Every board, task and log it holds
/// is mirrored to a persistence backend through this trait, and the initial
/// collections are fetched from it.
///
/// # Gateway Contract
///
/// Implementations must:
/// 1. Be `Send + Sync`, since calls run on spawned background tasks
/// 2. Report every failure as a [`GatewayError`] instead of panicking
/// 3. Treat each call independently; the caller issues no retries and no
///    ordering guarantees between concurrent calls
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskboard_client::gateways::{MemoryPersistenceGateway, PersistenceGateway};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let gateway: Arc<dyn PersistenceGateway> = Arc::new(MemoryPersistenceGateway::new());
///
/// let boards = gateway.fetch_boards().await?;
/// println!("{} boards from {}", boards.len(), gateway.name());
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use taskboard_shared::models::{Board, Log, Task};

use crate::error::GatewayResult;

/// Kinds of entity the backend stores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Board,
    Task,
    Log,
}

impl EntityKind {
    /// Collection path segment used by the backend
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Board => "boards",
            EntityKind::Task => "tasks",
            EntityKind::Log => "logs",
        }
    }
}

/// Remote persistence for boards, tasks and logs
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Returns the gateway name, used in logs
    fn name(&self) -> &str;

    /// Fetches every board
    async fn fetch_boards(&self) -> GatewayResult<Vec<Board>>;

    /// Fetches every task
    async fn fetch_tasks(&self) -> GatewayResult<Vec<Task>>;

    /// Fetches every log
    async fn fetch_logs(&self) -> GatewayResult<Vec<Log>>;

    async fn create_board(&self, board: &Board) -> GatewayResult<()>;

    async fn update_board(&self, board: &Board) -> GatewayResult<()>;

    async fn delete_board(&self, board_id: &str) -> GatewayResult<()>;

    async fn create_task(&self, task: &Task) -> GatewayResult<()>;

    async fn update_task(&self, task: &Task) -> GatewayResult<()>;

    async fn delete_task(&self, task_id: &str) -> GatewayResult<()>;

    async fn create_log(&self, log: &Log) -> GatewayResult<()>;

    async fn delete_log(&self, log_id: &str) -> GatewayResult<()>;
}
