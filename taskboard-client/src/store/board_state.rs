/// Board state container
///
/// Holds the client's copy of boards, tasks, logs and the session, and keeps
/// the persistence backend in step with it.
///
/// # Write Path
///
/// ```text
/// caller ─> BoardState method
///             ├─> local mutation (immediately visible)
///             └─> spawn gateway call ─> PendingSync
/// ```
///
/// Local state is authoritative. A failed remote call is logged and reported
/// through the returned [`PendingSync`] but never rolled back. Calls are not
/// retried, timed out or ordered: when two calls touch the same entity, the
/// one that completes last wins on the backend.
///
/// # Load Path
///
/// `load_data` fetches all three collections concurrently. If any fetch
/// fails, all three are replaced by the seed fixtures. Either way the state is
/// marked loaded.
///
/// # Runtime
///
/// Remote calls run on the tokio runtime handle passed to [`BoardState::new`].
/// Mutations may be called from any thread, including threads that are not
/// part of that runtime.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskboard_client::gateways::{LocalAuthGateway, MemoryPersistenceGateway};
/// use taskboard_client::store::BoardState;
/// use taskboard_shared::models::Board;
/// use tokio::runtime::Handle;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut state = BoardState::new(
///     Arc::new(MemoryPersistenceGateway::new()),
///     Arc::new(LocalAuthGateway::new()),
///     Handle::current(),
/// );
/// state.initialize().await;
///
/// let (board, sync) = state.save_board(Board::draft("Sprint"), true);
/// assert_eq!(board.columns.len(), 3);
/// sync.wait().await?;
/// # Ok(())
/// # }
/// ```

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use taskboard_shared::models::{default_columns, Board, Log, Task, User};
use taskboard_shared::seed::{seed_boards, seed_logs, seed_tasks};
use tokio::runtime::Handle;

use crate::error::{AccessError, AuthResult, GatewayResult};
use crate::gateways::{AuthGateway, PersistenceGateway};
use crate::store::sync::{CascadeDeleteReport, LoadSource, PendingSync};

/// Top-level screen the UI is showing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Board list
    #[default]
    Dashboard,

    /// A single board
    Board,

    /// The user's profile
    Profile,
}

/// Spawns a gateway call and logs its outcome
fn mirror<F>(runtime: &Handle, operation: &'static str, entity_id: String, call: F) -> PendingSync
where
    F: Future<Output = GatewayResult<()>> + Send + 'static,
{
    PendingSync::spawn(runtime, operation, async move {
        let result = call.await;
        match &result {
            Ok(()) => tracing::debug!(operation, entity_id = %entity_id, "Remote sync completed"),
            Err(err) => tracing::warn!(
                operation,
                entity_id = %entity_id,
                error = %err,
                "Remote sync failed; keeping local state"
            ),
        }
        result
    })
}

/// Client-side state for boards, tasks, logs and the session
pub struct BoardState {
    persistence: Arc<dyn PersistenceGateway>,
    auth: Arc<dyn AuthGateway>,
    runtime: Handle,

    is_logged_in: bool,
    current_user: Option<User>,
    current_view: View,
    selected_board_id: Option<String>,

    boards: Vec<Board>,
    tasks: Vec<Task>,
    /// Newest first
    logs: Vec<Log>,
    registered_users: Vec<User>,
    is_data_loaded: bool,
}

impl BoardState {
    /// Creates a logged-out, empty state bound to its gateways
    ///
    /// Remote sync calls are spawned on `runtime`. Inside async code pass
    /// `Handle::current()`; from a UI thread pass the handle of the runtime
    /// the app started.
    pub fn new(
        persistence: Arc<dyn PersistenceGateway>,
        auth: Arc<dyn AuthGateway>,
        runtime: Handle,
    ) -> Self {
        BoardState {
            persistence,
            auth,
            runtime,
            is_logged_in: false,
            current_user: None,
            current_view: View::Dashboard,
            selected_board_id: None,
            boards: Vec::new(),
            tasks: Vec::new(),
            logs: Vec::new(),
            registered_users: Vec::new(),
            is_data_loaded: false,
        }
    }

    // ----- accessors -----

    pub fn is_logged_in(&self) -> bool {
        self.is_logged_in
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn current_view(&self) -> View {
        self.current_view
    }

    pub fn selected_board_id(&self) -> Option<&str> {
        self.selected_board_id.as_deref()
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Logs, newest first
    pub fn logs(&self) -> &[Log] {
        &self.logs
    }

    pub fn registered_users(&self) -> &[User] {
        &self.registered_users
    }

    /// Checks whether `load_data` has completed at least once
    pub fn is_data_loaded(&self) -> bool {
        self.is_data_loaded
    }

    /// Returns the selected board, if it is loaded
    pub fn selected_board(&self) -> Option<&Board> {
        let id = self.selected_board_id.as_deref()?;
        self.boards.iter().find(|board| board.id == id)
    }

    /// Returns the selected board's tasks; empty without a selection
    pub fn board_tasks(&self) -> Vec<&Task> {
        match self.selected_board_id.as_deref() {
            Some(id) => self.tasks.iter().filter(|task| task.board_id == id).collect(),
            None => Vec::new(),
        }
    }

    /// Returns the selected board's logs, newest first; empty without a selection
    pub fn board_logs(&self) -> Vec<&Log> {
        match self.selected_board_id.as_deref() {
            Some(id) => self.logs.iter().filter(|log| log.board_id == id).collect(),
            None => Vec::new(),
        }
    }

    // ----- access control -----

    /// Checks whether the current user may open a board
    ///
    /// Allowed iff the user's email is the board's creator or one of its
    /// members. Without a logged-in user every board is denied.
    ///
    /// # Errors
    ///
    /// - `AccessError::NotFound` if no board has this id
    /// - `AccessError::Forbidden` if the user is neither creator nor member
    pub fn check_board_access(&self, board_id: &str) -> Result<&Board, AccessError> {
        let board = self
            .boards
            .iter()
            .find(|board| board.id == board_id)
            .ok_or_else(|| AccessError::NotFound(board_id.to_string()))?;

        match &self.current_user {
            Some(user) if board.is_accessible_by(&user.email) => Ok(board),
            _ => Err(AccessError::Forbidden(board_id.to_string())),
        }
    }

    // ----- loading -----

    /// Restores the session, loads registered users, then loads data
    ///
    /// Auth gateway failures are logged and do not stop the data load, so the
    /// state always ends up loaded.
    pub async fn initialize(&mut self) -> LoadSource {
        if let Err(err) = self.restore_session().await {
            tracing::error!(error = %err, "Failed to restore session");
        }

        self.load_data().await
    }

    async fn restore_session(&mut self) -> AuthResult<()> {
        self.auth.initialize_auth().await?;

        if let Some(user) = self.auth.get_current_user().await? {
            tracing::info!(email = %user.email, "Restored session");
            self.current_user = Some(user);
            self.is_logged_in = true;
        }

        self.registered_users = self.auth.get_all_registered_users().await?;
        Ok(())
    }

    /// Fetches boards, tasks and logs, falling back to seed fixtures
    pub async fn load_data(&mut self) -> LoadSource {
        let gateway = Arc::clone(&self.persistence);
        let fetched = tokio::try_join!(
            gateway.fetch_boards(),
            gateway.fetch_tasks(),
            gateway.fetch_logs(),
        );

        let source = match fetched {
            Ok((boards, tasks, logs)) => {
                tracing::info!(
                    gateway = gateway.name(),
                    boards = boards.len(),
                    tasks = tasks.len(),
                    logs = logs.len(),
                    "Loaded data from backend"
                );
                self.boards = boards;
                self.tasks = tasks;
                self.logs = logs;
                LoadSource::Remote
            }
            Err(err) => {
                tracing::warn!(
                    gateway = gateway.name(),
                    error = %err,
                    "Backend unavailable; using seed data"
                );
                self.boards = seed_boards();
                self.tasks = seed_tasks();
                self.logs = seed_logs();
                LoadSource::Seed { reason: err }
            }
        };

        self.is_data_loaded = true;
        source
    }

    // ----- session -----

    /// Logs in through the auth gateway
    ///
    /// Returns `Ok(false)` for rejected credentials; the session is unchanged.
    pub async fn login_user(&mut self, email: &str, password: &str) -> AuthResult<bool> {
        match self.auth.login(email, password).await? {
            Some(user) => {
                self.current_user = Some(user);
                self.is_logged_in = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Registers an account and adds its profile to `registered_users`
    ///
    /// Name and email are trimmed first. The profile is added only if no
    /// registered user has that email yet.
    pub async fn register_user(&mut self, name: &str, email: &str, password: &str) -> AuthResult<bool> {
        let (name, email) = (name.trim(), email.trim());
        let registered = self.auth.register(name, email, password).await?;

        if registered && !self.registered_users.iter().any(|user| user.email == email) {
            self.registered_users.push(User::new(name, email));
        }

        Ok(registered)
    }

    /// Ends the session and resets navigation
    ///
    /// Local session state is reset even if the gateway reports an error.
    pub async fn logout_user(&mut self) -> AuthResult<()> {
        let result = self.auth.logout().await;

        self.current_user = None;
        self.is_logged_in = false;
        self.selected_board_id = None;
        self.current_view = View::Dashboard;

        result
    }

    /// Updates the logged-in user's name and avatar
    ///
    /// Returns `Ok(false)` when nobody is logged in or the gateway refuses.
    pub async fn update_profile(&mut self, user: User) -> AuthResult<bool> {
        if self.current_user.is_none() {
            return Ok(false);
        }

        let updated = self.auth.update_profile(&user.name, &user.avatar).await?;
        if updated {
            for registered in self
                .registered_users
                .iter_mut()
                .filter(|registered| registered.email == user.email)
            {
                registered.name = user.name.clone();
                registered.avatar = user.avatar.clone();
            }
            self.current_user = Some(user);
        }

        Ok(updated)
    }

    // ----- navigation -----

    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    pub fn select_board(&mut self, board_id: Option<String>) {
        self.selected_board_id = board_id;
    }

    // ----- boards -----

    /// Returns `board{epoch_millis}`, bumped until no local board uses it
    fn next_board_id(&self) -> String {
        let mut millis = Utc::now().timestamp_millis();
        loop {
            let id = format!("board{}", millis);
            if !self.boards.iter().any(|board| board.id == id) {
                return id;
            }
            millis += 1;
        }
    }

    /// Saves a board locally and mirrors it to the backend
    ///
    /// A new board gets a fresh id, the current time, the current user as
    /// creator and the three default columns, whatever the input carried.
    /// An existing board replaces the local board with the same id.
    pub fn save_board(&mut self, board: Board, is_new: bool) -> (Board, PendingSync) {
        if !is_new {
            let sync = self.update_board(board.clone());
            return (board, sync);
        }

        let (email, name) = self
            .current_user
            .as_ref()
            .map(|user| (user.email.clone(), user.name.clone()))
            .unwrap_or_default();

        let mut board = board;
        board.id = self.next_board_id();
        board.created_at = Some(Utc::now());
        board.created_by = email;
        board.created_by_name = name;
        board.columns = default_columns();

        self.boards.push(board.clone());
        tracing::info!(board_id = %board.id, title = %board.title, "Board created");

        let gateway = Arc::clone(&self.persistence);
        let remote = board.clone();
        let sync = mirror(&self.runtime, "create_board", board.id.clone(), async move {
            gateway.create_board(&remote).await
        });

        (board, sync)
    }

    /// Replaces the board with the same id and mirrors it to the backend
    ///
    /// The backend is updated even when no local board matched.
    pub fn update_board(&mut self, board: Board) -> PendingSync {
        if let Some(slot) = self.boards.iter_mut().find(|b| b.id == board.id) {
            *slot = board.clone();
        }

        let gateway = Arc::clone(&self.persistence);
        mirror(&self.runtime, "update_board", board.id.clone(), async move {
            gateway.update_board(&board).await
        })
    }

    /// Deletes a board with its tasks and logs
    ///
    /// Local removal is immediate and unconditional. Remote deletes for the
    /// board and every dependent task and log run concurrently; one failing
    /// does not stop the others.
    pub fn delete_board(&mut self, board_id: &str) -> PendingSync<CascadeDeleteReport> {
        let task_ids: Vec<String> = self
            .tasks
            .iter()
            .filter(|task| task.board_id == board_id)
            .map(|task| task.id.clone())
            .collect();
        let log_ids: Vec<String> = self
            .logs
            .iter()
            .filter(|log| log.board_id == board_id)
            .map(|log| log.id.clone())
            .collect();

        self.boards.retain(|board| board.id != board_id);
        self.tasks.retain(|task| task.board_id != board_id);
        self.logs.retain(|log| log.board_id != board_id);

        if self.selected_board_id.as_deref() == Some(board_id) {
            self.selected_board_id = None;
        }

        tracing::info!(
            board_id,
            tasks = task_ids.len(),
            logs = log_ids.len(),
            "Board deleted"
        );

        let gateway = Arc::clone(&self.persistence);
        let board_id = board_id.to_string();

        PendingSync::spawn(&self.runtime, "delete_board", async move {
            let task_deletes = task_ids.into_iter().map(|id| {
                let gateway = Arc::clone(&gateway);
                async move {
                    let result = gateway.delete_task(&id).await;
                    (id, result)
                }
            });
            let log_deletes = log_ids.into_iter().map(|id| {
                let gateway = Arc::clone(&gateway);
                async move {
                    let result = gateway.delete_log(&id).await;
                    (id, result)
                }
            });

            let (board, tasks, logs) = futures::join!(
                gateway.delete_board(&board_id),
                join_all(task_deletes),
                join_all(log_deletes),
            );

            let report = CascadeDeleteReport {
                board_id,
                board,
                tasks,
                logs,
            };

            if report.is_fully_synced() {
                tracing::debug!(board_id = %report.board_id, "Remote cascade delete completed");
            } else {
                tracing::warn!(
                    board_id = %report.board_id,
                    failures = report.failure_count(),
                    "Remote cascade delete partially failed; keeping local state"
                );
            }

            Ok(report)
        })
    }

    // ----- tasks and logs -----

    /// Appends a task and mirrors it to the backend
    pub fn add_task(&mut self, task: Task) -> PendingSync {
        self.tasks.push(task.clone());

        let gateway = Arc::clone(&self.persistence);
        mirror(&self.runtime, "create_task", task.id.clone(), async move {
            gateway.create_task(&task).await
        })
    }

    /// Replaces the task with the same id and mirrors it to the backend
    ///
    /// Returns `None`, changing nothing and sending nothing, when no task has
    /// that id.
    pub fn update_task(&mut self, task: Task) -> Option<PendingSync> {
        let slot = self.tasks.iter_mut().find(|t| t.id == task.id)?;
        *slot = task.clone();

        let gateway = Arc::clone(&self.persistence);
        Some(mirror(&self.runtime, "update_task", task.id.clone(), async move {
            gateway.update_task(&task).await
        }))
    }

    /// Removes a task and mirrors the delete to the backend
    pub fn remove_task(&mut self, task_id: &str) -> PendingSync {
        self.tasks.retain(|task| task.id != task_id);

        let gateway = Arc::clone(&self.persistence);
        let id = task_id.to_string();
        mirror(&self.runtime, "delete_task", id.clone(), async move {
            gateway.delete_task(&id).await
        })
    }

    /// Prepends a log (newest first) and mirrors it to the backend
    pub fn add_log(&mut self, log: Log) -> PendingSync {
        self.logs.insert(0, log.clone());

        let gateway = Arc::clone(&self.persistence);
        mirror(&self.runtime, "create_log", log.id.clone(), async move {
            gateway.create_log(&log).await
        })
    }
}

impl std::fmt::Debug for BoardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardState")
            .field("persistence", &self.persistence.name())
            .field("is_logged_in", &self.is_logged_in)
            .field("current_view", &self.current_view)
            .field("selected_board_id", &self.selected_board_id)
            .field("boards", &self.boards.len())
            .field("tasks", &self.tasks.len())
            .field("logs", &self.logs.len())
            .field("is_data_loaded", &self.is_data_loaded)
            .finish()
    }
}
