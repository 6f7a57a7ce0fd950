/// Outcomes of remote synchronization
///
/// Local mutations never wait for the backend. Each one spawns its remote
/// call on the runtime handle the state was built with and hands back a
/// [`PendingSync`]:
///
/// - drop it to fire and forget; the call keeps running
/// - `wait()` on it to learn whether the backend accepted the change
///
/// Either way the local change stays in place. Nothing is rolled back.
///
/// # Example
///
/// ```no_run
/// # use taskboard_client::store::BoardState;
/// # use taskboard_shared::models::Task;
/// # async fn example(state: &mut BoardState) {
/// let sync = state.add_task(Task::new("board1", "Ship"));
///
/// if let Err(err) = sync.wait().await {
///     eprintln!("saved locally, backend said: {}", err);
/// }
/// # }
/// ```

use std::future::Future;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::error::{GatewayError, GatewayResult};

/// Handle to a remote call that is already running
#[derive(Debug)]
pub struct PendingSync<T = ()> {
    operation: &'static str,
    handle: JoinHandle<GatewayResult<T>>,
}

impl<T: Send + 'static> PendingSync<T> {
    /// Spawns `call` on `runtime`; callable from any thread
    pub(crate) fn spawn<F>(runtime: &Handle, operation: &'static str, call: F) -> Self
    where
        F: Future<Output = GatewayResult<T>> + Send + 'static,
    {
        PendingSync {
            operation,
            handle: runtime.spawn(call),
        }
    }

    /// Gateway operation this handle tracks, e.g. `create_board`
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Checks whether the remote call has finished
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the remote call and returns its outcome
    ///
    /// # Errors
    ///
    /// Returns the gateway error, or `GatewayError::Interrupted` if the
    /// background task panicked.
    pub async fn wait(self) -> GatewayResult<T> {
        match self.handle.await {
            Ok(result) => result,
            Err(err) => Err(GatewayError::Interrupted(format!(
                "{}: {}",
                self.operation, err
            ))),
        }
    }
}

/// Per-entity outcome of a cascading board delete
#[derive(Debug, Clone)]
pub struct CascadeDeleteReport {
    /// Deleted board id
    pub board_id: String,

    /// Outcome of the board delete itself
    pub board: GatewayResult<()>,

    /// Outcome per dependent task id
    pub tasks: Vec<(String, GatewayResult<()>)>,

    /// Outcome per dependent log id
    pub logs: Vec<(String, GatewayResult<()>)>,
}

impl CascadeDeleteReport {
    /// Number of remote deletes that failed
    pub fn failure_count(&self) -> usize {
        let dependents = self.tasks.iter().chain(self.logs.iter());
        usize::from(self.board.is_err())
            + dependents.filter(|(_, result)| result.is_err()).count()
    }

    /// Checks whether the backend accepted every delete
    pub fn is_fully_synced(&self) -> bool {
        self.failure_count() == 0
    }
}

/// Where the loaded collections came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    /// Fetched from the persistence gateway
    Remote,

    /// Gateway failed; seed fixtures were used instead
    Seed { reason: GatewayError },
}

impl LoadSource {
    pub fn is_remote(&self) -> bool {
        matches!(self, LoadSource::Remote)
    }
}
