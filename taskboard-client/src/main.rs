//! # Task Board Client
//!
//! Loads the board state against the configured API and prints what the
//! current user can see. Falls back to seed data when the API is down.
//!
//! ## Usage
//!
//! ```bash
//! TASKBOARD__API__BASE_URL=http://localhost:4000 cargo run -p taskboard-client
//! ```
//!
//! Set `TASKBOARD_EMAIL` and `TASKBOARD_PASSWORD` to log in as someone other
//! than the demo owner.

use std::sync::Arc;

use taskboard_client::config::ClientConfig;
use taskboard_client::gateways::{HttpPersistenceGateway, LocalAuthGateway};
use taskboard_client::store::{BoardState, LoadSource};
use taskboard_shared::seed::{SEED_OWNER_EMAIL, SEED_PASSWORD};
use tokio::runtime::Handle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskboard_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Task board client v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = ClientConfig::from_env()?;
    tracing::info!(base_url = %config.api.base_url, "Loaded configuration");

    let persistence = Arc::new(HttpPersistenceGateway::new(&config.api)?);
    let auth = Arc::new(LocalAuthGateway::new());
    let mut state = BoardState::new(persistence, auth, Handle::current());

    if let LoadSource::Seed { reason } = state.initialize().await {
        tracing::warn!(error = %reason, "Showing seed data");
    }

    let email = std::env::var("TASKBOARD_EMAIL").unwrap_or_else(|_| SEED_OWNER_EMAIL.to_string());
    let password = std::env::var("TASKBOARD_PASSWORD").unwrap_or_else(|_| SEED_PASSWORD.to_string());

    if !state.login_user(&email, &password).await? {
        anyhow::bail!("Login failed for {}", email);
    }

    let visible: Vec<_> = state
        .boards()
        .iter()
        .filter(|board| state.check_board_access(&board.id).is_ok())
        .collect();

    tracing::info!(
        email = %email,
        visible = visible.len(),
        total = state.boards().len(),
        "Boards loaded"
    );

    for board in visible {
        let tasks = state.tasks().iter().filter(|t| t.board_id == board.id).count();
        println!("{:<12} {:<24} {} tasks", board.id, board.title, tasks);
    }

    Ok(())
}
