/// Error types for the client state and its gateways
///
/// Three families of failure exist and none of them is fatal to the client:
///
/// - [`GatewayError`]: the remote API could not be reached, answered with a
///   non-success status, or sent a body that does not parse. Fetch failures
///   make the state fall back to seed data; mutation failures are reported
///   through the sync handle and leave local state untouched.
/// - [`AccessError`]: a board lookup failed the creator/member check. It is
///   returned as a value for the caller to render, with a localized message.
/// - [`AuthError`]: the auth gateway itself broke (e.g. hashing failed).
///   Wrong credentials are not an error; they yield `None` / `false`.
///
/// # Example
///
/// ```
/// use taskboard_client::error::AccessError;
///
/// let err = AccessError::Forbidden("board1".to_string());
/// assert_eq!(err.to_string(), "이 보드에 접근할 권한이 없습니다.");
/// assert_eq!(err.board_id(), "board1");
/// ```

use taskboard_shared::auth::password::PasswordError;

/// Gateway result type alias
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Auth result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Failure talking to the persistence backend
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// Connection refused, DNS failure, reset, ...
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// Response body did not match the expected shape
    #[error("Malformed response: {0}")]
    Decode(String),

    /// Backend is switched off (in-memory gateway only)
    #[error("Remote service is offline")]
    Offline,

    /// The background sync task panicked or was aborted
    #[error("Sync task interrupted: {0}")]
    Interrupted(String),
}

impl GatewayError {
    /// Returns the HTTP status code, if the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return GatewayError::Decode(err.to_string());
        }

        if let Some(status) = err.status() {
            return GatewayError::Status {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            };
        }

        GatewayError::Network(err.to_string())
    }
}

/// Board access check failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// No board with this id is loaded
    #[error("보드를 찾을 수 없습니다.")]
    NotFound(String),

    /// Current user is neither the creator nor a member
    #[error("이 보드에 접근할 권한이 없습니다.")]
    Forbidden(String),
}

impl AccessError {
    /// Returns the board id the check was made for
    pub fn board_id(&self) -> &str {
        match self {
            AccessError::NotFound(id) | AccessError::Forbidden(id) => id,
        }
    }
}

/// Failure inside an auth gateway
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Password hashing or verification failed
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Backend-specific failure
    #[error("Auth backend error: {0}")]
    Backend(String),
}
