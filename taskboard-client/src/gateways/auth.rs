/// Auth gateway contract
///
/// Credential checks, registration and session storage live behind this
/// trait. The board state only mirrors outcomes into its session fields.
///
/// Rejected credentials are ordinary outcomes (`Ok(None)` / `Ok(false)`);
/// `Err` is reserved for the gateway itself failing.

use async_trait::async_trait;
use taskboard_shared::models::User;

use crate::error::AuthResult;

/// Login, registration, session and profile operations
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Prepares the backing store; safe to call more than once
    async fn initialize_auth(&self) -> AuthResult<()>;

    /// Checks credentials and opens a session on success
    async fn login(&self, email: &str, password: &str) -> AuthResult<Option<User>>;

    /// Creates an account; `false` when the email is taken or input is blank
    async fn register(&self, name: &str, email: &str, password: &str) -> AuthResult<bool>;

    /// Closes the current session, if any
    async fn logout(&self) -> AuthResult<()>;

    /// Returns the user of the persisted session, if any
    async fn get_current_user(&self) -> AuthResult<Option<User>>;

    /// Updates the logged-in user's profile; `false` when nobody is logged in
    async fn update_profile(&self, name: &str, avatar: &str) -> AuthResult<bool>;

    /// Returns every registered profile
    async fn get_all_registered_users(&self) -> AuthResult<Vec<User>>;
}
