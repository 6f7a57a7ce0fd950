//! # Task Board Client Library
//!
//! Client-side state container for a kanban task board. It keeps boards,
//! tasks, logs and the session in memory and mirrors every change to a
//! persistence backend without waiting for it.
//!
//! ## Modules
//!
//! - `store`: `BoardState` and the handles returned by its mutations
//! - `gateways`: persistence and auth backends (HTTP, in-memory, local auth)
//! - `config`: API settings loaded from file and environment
//! - `error`: gateway, access and auth errors
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use taskboard_client::gateways::{LocalAuthGateway, MemoryPersistenceGateway};
//! use taskboard_client::store::BoardState;
//! use tokio::runtime::Handle;
//!
//! # async fn example() {
//! let mut state = BoardState::new(
//!     Arc::new(MemoryPersistenceGateway::new()),
//!     Arc::new(LocalAuthGateway::new()),
//!     Handle::current(),
//! );
//! state.initialize().await;
//! println!("{} boards", state.boards().len());
//! # }
//! ```

pub mod config;
pub mod error;
pub mod gateways;
pub mod store;

pub use error::{AccessError, AuthError, GatewayError};
pub use store::{BoardState, CascadeDeleteReport, LoadSource, PendingSync, View};
