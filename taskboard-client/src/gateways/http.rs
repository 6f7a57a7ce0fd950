/// HTTP persistence gateway
///
/// Talks JSON to the task board REST API.
///
/// # Routes
///
/// ```text
/// GET    /boards          -> [Board]
/// GET    /tasks           -> [Task]
/// GET    /logs            -> [Log]
/// POST   /boards          <- Board
/// PUT    /boards/{id}     <- Board
/// DELETE /boards/{id}
/// POST   /tasks           <- Task
/// PUT    /tasks/{id}      <- Task
/// DELETE /tasks/{id}
/// POST   /logs            <- Log
/// DELETE /logs/{id}
/// ```
///
/// Any 2xx status is success; mutation response bodies are ignored. Requests
/// carry no timeout, so a backend that never answers leaves the call pending.
///
/// # Example
///
/// ```no_run
/// use taskboard_client::config::ApiConfig;
/// use taskboard_client::gateways::{HttpPersistenceGateway, PersistenceGateway};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let gateway = HttpPersistenceGateway::new(&ApiConfig::new("http://localhost:4000"))?;
/// let boards = gateway.fetch_boards().await?;
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use taskboard_shared::models::{Board, Log, Task};

use crate::config::ApiConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::gateways::persistence::{EntityKind, PersistenceGateway};

/// REST-backed persistence gateway
#[derive(Debug, Clone)]
pub struct HttpPersistenceGateway {
    client: Client,
    api: ApiConfig,
}

/// Turns a non-2xx response into a status error
fn check_status(response: Response) -> GatewayResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    Err(GatewayError::Status {
        status: status.as_u16(),
        url: response.url().to_string(),
    })
}

impl HttpPersistenceGateway {
    /// Builds the HTTP client for `api`
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Network` if the TLS backend cannot be
    /// initialized.
    pub fn new(api: &ApiConfig) -> GatewayResult<Self> {
        let client = Client::builder().user_agent(api.user_agent.as_str()).build()?;

        Ok(HttpPersistenceGateway {
            client,
            api: api.clone(),
        })
    }

    /// Returns the API root this gateway talks to
    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }

    fn item_path(kind: EntityKind, id: &str) -> String {
        format!("{}/{}", kind.collection(), id)
    }

    async fn fetch_all<T: DeserializeOwned + Send>(&self, kind: EntityKind) -> GatewayResult<Vec<T>> {
        let url = self.api.endpoint(kind.collection());
        tracing::debug!(url = %url, "Fetching collection");

        let response = check_status(self.client.get(&url).send().await?)?;
        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| GatewayError::Decode(format!("{}: {}", url, e)))
    }

    async fn send<T>(&self, method: Method, path: &str, body: Option<&T>) -> GatewayResult<()>
    where
        T: Serialize + Sync + ?Sized,
    {
        let url = self.api.endpoint(path);
        tracing::debug!(method = %method, url = %url, "Sending mutation");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        check_status(request.send().await?)?;
        Ok(())
    }

    async fn delete(&self, kind: EntityKind, id: &str) -> GatewayResult<()> {
        self.send::<()>(Method::DELETE, &Self::item_path(kind, id), None)
            .await
    }
}

#[async_trait]
impl PersistenceGateway for HttpPersistenceGateway {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_boards(&self) -> GatewayResult<Vec<Board>> {
        self.fetch_all(EntityKind::Board).await
    }

    async fn fetch_tasks(&self) -> GatewayResult<Vec<Task>> {
        self.fetch_all(EntityKind::Task).await
    }

    async fn fetch_logs(&self) -> GatewayResult<Vec<Log>> {
        self.fetch_all(EntityKind::Log).await
    }

    async fn create_board(&self, board: &Board) -> GatewayResult<()> {
        self.send(Method::POST, EntityKind::Board.collection(), Some(board))
            .await
    }

    async fn update_board(&self, board: &Board) -> GatewayResult<()> {
        let path = Self::item_path(EntityKind::Board, &board.id);
        self.send(Method::PUT, &path, Some(board)).await
    }

    async fn delete_board(&self, board_id: &str) -> GatewayResult<()> {
        self.delete(EntityKind::Board, board_id).await
    }

    async fn create_task(&self, task: &Task) -> GatewayResult<()> {
        self.send(Method::POST, EntityKind::Task.collection(), Some(task))
            .await
    }

    async fn update_task(&self, task: &Task) -> GatewayResult<()> {
        let path = Self::item_path(EntityKind::Task, &task.id);
        self.send(Method::PUT, &path, Some(task)).await
    }

    async fn delete_task(&self, task_id: &str) -> GatewayResult<()> {
        self.delete(EntityKind::Task, task_id).await
    }

    async fn create_log(&self, log: &Log) -> GatewayResult<()> {
        self.send(Method::POST, EntityKind::Log.collection(), Some(log))
            .await
    }

    async fn delete_log(&self, log_id: &str) -> GatewayResult<()> {
        self.delete(EntityKind::Log, log_id).await
    }
}
