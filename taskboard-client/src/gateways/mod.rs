/// Gateways to the services the board state depends on
///
/// The board state talks to two collaborators, each behind a trait so the
/// backing implementation can be swapped:
///
/// - [`PersistenceGateway`]: fetch and mutate boards, tasks and logs
/// - [`AuthGateway`]: login, registration, session and profile
///
/// # Implementations
///
/// - **Http**: REST backend over reqwest
/// - **Memory**: in-process backend with offline and failure switches, for
///   tests and demos
/// - **LocalAuth**: in-memory accounts with Argon2id password hashes
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskboard_client::gateways::{AuthGateway, LocalAuthGateway, MemoryPersistenceGateway, PersistenceGateway};
///
/// let persistence: Arc<dyn PersistenceGateway> = Arc::new(MemoryPersistenceGateway::new());
/// let auth: Arc<dyn AuthGateway> = Arc::new(LocalAuthGateway::new());
/// ```

pub mod auth;
pub mod http;
pub mod local_auth;
pub mod memory;
pub mod persistence;

// Re-export main types
pub use auth::AuthGateway;
pub use http::HttpPersistenceGateway;
pub use local_auth::LocalAuthGateway;
pub use memory::MemoryPersistenceGateway;
pub use persistence::{EntityKind, PersistenceGateway};
