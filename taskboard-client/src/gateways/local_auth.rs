/// Local auth gateway
///
/// Keeps accounts and a single active session in process memory. Passwords
/// are stored as Argon2id hashes (see `taskboard_shared::auth::password`).
///
/// # Behavior
///
/// - `initialize_auth` installs the seed demo accounts when no account exists,
///   so the seed boards have owners who can log in
/// - `register` refuses blank fields and emails that are already taken
///   (compared case-insensitively), and does not log the new user in
/// - `login` answers `None` for unknown emails and wrong passwords alike
///
/// # Example
///
/// ```
/// use taskboard_client::gateways::{AuthGateway, LocalAuthGateway};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let auth = LocalAuthGateway::new();
/// assert!(auth.register("A", "a@x.com", "secret").await?);
///
/// let user = auth.login("a@x.com", "secret").await?;
/// assert_eq!(user.map(|u| u.name), Some("A".to_string()));
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use taskboard_shared::auth::password::{hash_password, verify_password};
use taskboard_shared::models::User;
use taskboard_shared::seed::{seed_users, SEED_PASSWORD};
use tokio::sync::Mutex;

use crate::error::AuthResult;
use crate::gateways::auth::AuthGateway;

#[derive(Debug, Clone)]
struct Account {
    profile: User,
    password_hash: String,
}

#[derive(Debug, Default)]
struct AuthStore {
    accounts: Vec<Account>,
    /// Email of the logged-in account
    session: Option<String>,
}

impl AuthStore {
    fn find(&self, email: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|account| account.profile.email.eq_ignore_ascii_case(email))
    }

    fn session_account_mut(&mut self) -> Option<&mut Account> {
        let email = self.session.clone()?;
        self.accounts
            .iter_mut()
            .find(|account| account.profile.email == email)
    }
}

/// In-memory account registry with Argon2id password hashes
#[derive(Debug, Default)]
pub struct LocalAuthGateway {
    store: Mutex<AuthStore>,
}

impl LocalAuthGateway {
    /// Creates a gateway with no accounts and no session
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthGateway for LocalAuthGateway {
    async fn initialize_auth(&self) -> AuthResult<()> {
        if !self.store.lock().await.accounts.is_empty() {
            return Ok(());
        }

        let mut seeded = Vec::new();
        for profile in seed_users() {
            seeded.push(Account {
                profile,
                password_hash: hash_password(SEED_PASSWORD)?,
            });
        }

        let mut store = self.store.lock().await;
        if store.accounts.is_empty() {
            tracing::info!(accounts = seeded.len(), "Installed demo accounts");
            store.accounts = seeded;
        }

        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> AuthResult<Option<User>> {
        let account = match self.store.lock().await.find(email) {
            Some(account) => account.clone(),
            None => {
                tracing::debug!(email, "Login for unknown email");
                return Ok(None);
            }
        };

        if !verify_password(password, &account.password_hash)? {
            tracing::debug!(email, "Login with wrong password");
            return Ok(None);
        }

        self.store.lock().await.session = Some(account.profile.email.clone());
        tracing::info!(email = %account.profile.email, "User logged in");

        Ok(Some(account.profile))
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> AuthResult<bool> {
        let email = email.trim();
        if name.trim().is_empty() || email.is_empty() || password.is_empty() {
            return Ok(false);
        }

        if self.store.lock().await.find(email).is_some() {
            tracing::debug!(email, "Registration for existing email");
            return Ok(false);
        }

        let password_hash = hash_password(password)?;

        let mut store = self.store.lock().await;
        // Re-check: another registration may have finished while hashing
        if store.find(email).is_some() {
            return Ok(false);
        }

        store.accounts.push(Account {
            profile: User::new(name.trim(), email),
            password_hash,
        });
        tracing::info!(email, "User registered");

        Ok(true)
    }

    async fn logout(&self) -> AuthResult<()> {
        self.store.lock().await.session = None;
        Ok(())
    }

    async fn get_current_user(&self) -> AuthResult<Option<User>> {
        Ok(self
            .store
            .lock()
            .await
            .session_account_mut()
            .map(|account| account.profile.clone()))
    }

    async fn update_profile(&self, name: &str, avatar: &str) -> AuthResult<bool> {
        let mut store = self.store.lock().await;
        let Some(account) = store.session_account_mut() else {
            return Ok(false);
        };

        account.profile.name = name.to_string();
        account.profile.avatar = avatar.to_string();
        Ok(true)
    }

    async fn get_all_registered_users(&self) -> AuthResult<Vec<User>> {
        Ok(self
            .store
            .lock()
            .await
            .accounts
            .iter()
            .map(|account| account.profile.clone())
            .collect())
    }
}
