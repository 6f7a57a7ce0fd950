/// Integration tests for BoardState
///
/// Runs the state container against the in-memory persistence gateway and
/// the local auth gateway, so no network is needed.
///
/// Run with: cargo test -p taskboard-client --test board_state_tests

use std::sync::Arc;

use taskboard_client::error::{AccessError, GatewayError};
use taskboard_client::gateways::{AuthGateway, LocalAuthGateway, MemoryPersistenceGateway};
use taskboard_client::store::{BoardState, LoadSource, View};
use chrono::{TimeZone, Utc};
use taskboard_shared::models::{Board, Column, Log, Task, User};
use taskboard_shared::seed::{
    seed_boards, seed_logs, seed_tasks, SEED_MEMBER_EMAIL, SEED_OWNER_EMAIL, SEED_PASSWORD,
};
use tokio::runtime::Handle;
use tokio::time::Duration;

/// Helper to build a state over a seeded memory backend
fn seeded() -> (BoardState, Arc<MemoryPersistenceGateway>, Arc<LocalAuthGateway>) {
    let gateway = Arc::new(MemoryPersistenceGateway::with_data(
        seed_boards(),
        seed_tasks(),
        seed_logs(),
    ));
    let auth = Arc::new(LocalAuthGateway::new());
    let state = BoardState::new(gateway.clone(), auth.clone(), Handle::current());
    (state, gateway, auth)
}

/// Helper to initialize and log in as `email`
async fn logged_in_as(email: &str) -> (BoardState, Arc<MemoryPersistenceGateway>) {
    let (mut state, gateway, _auth) = seeded();
    assert_eq!(state.initialize().await, LoadSource::Remote);
    assert!(state.login_user(email, SEED_PASSWORD).await.unwrap());
    (state, gateway)
}

#[tokio::test]
async fn test_initialize_loads_remote_data() {
    let (mut state, _gateway, _auth) = seeded();

    let source = state.initialize().await;

    assert!(source.is_remote());
    assert!(state.is_data_loaded());
    assert_eq!(state.boards(), seed_boards().as_slice());
    assert_eq!(state.tasks().len(), 4);
    assert_eq!(state.logs().len(), 3);
    assert_eq!(state.registered_users().len(), 2);
    assert!(!state.is_logged_in());
}

#[tokio::test]
async fn test_initialize_falls_back_to_seed_when_offline() {
    let gateway = Arc::new(MemoryPersistenceGateway::new());
    gateway.set_offline(true);
    let mut state = BoardState::new(gateway, Arc::new(LocalAuthGateway::new()), Handle::current());

    let source = state.initialize().await;

    assert_eq!(
        source,
        LoadSource::Seed {
            reason: GatewayError::Offline
        }
    );
    assert!(state.is_data_loaded());
    assert_eq!(state.boards(), seed_boards().as_slice());
    assert_eq!(state.tasks(), seed_tasks().as_slice());
    assert_eq!(state.logs(), seed_logs().as_slice());
}

#[tokio::test]
async fn test_load_data_replaces_all_collections_on_any_failure() {
    let gateway = Arc::new(MemoryPersistenceGateway::new());
    let mut state = BoardState::new(gateway.clone(), Arc::new(LocalAuthGateway::new()), Handle::current());

    assert!(state.load_data().await.is_remote());
    assert!(state.boards().is_empty());

    gateway.set_offline(true);
    assert!(!state.load_data().await.is_remote());
    assert_eq!(state.boards().len(), 2);
    assert_eq!(state.tasks().len(), 4);
}

#[tokio::test]
async fn test_initialize_restores_existing_session() {
    let (mut state, _gateway, auth) = seeded();
    auth.initialize_auth().await.unwrap();
    auth.login(SEED_MEMBER_EMAIL, SEED_PASSWORD).await.unwrap();

    state.initialize().await;

    assert!(state.is_logged_in());
    assert_eq!(
        state.current_user().map(|u| u.email.as_str()),
        Some(SEED_MEMBER_EMAIL)
    );
}

#[tokio::test]
async fn test_login_with_wrong_password_keeps_session_empty() {
    let (mut state, _gateway, _auth) = seeded();
    state.initialize().await;

    assert!(!state.login_user(SEED_OWNER_EMAIL, "wrong").await.unwrap());
    assert!(!state.is_logged_in());
    assert!(state.current_user().is_none());
}

#[tokio::test]
async fn test_save_new_board_stamps_owner_and_columns() {
    let (mut state, gateway) = logged_in_as(SEED_OWNER_EMAIL).await;

    let stale = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).single();
    let mut draft = Board::draft("Sprint");
    draft.id = "client-chosen".to_string();
    draft.columns = vec![Column::new("backlog", "Backlog", "")];
    draft.created_by = "intruder@x.com".to_string();
    draft.created_by_name = "Intruder".to_string();
    draft.created_at = stale;
    let (board, sync) = state.save_board(draft, true);

    assert!(board.id.starts_with("board"));
    assert_ne!(board.id, "client-chosen");
    assert_eq!(board.title, "Sprint");
    assert_eq!(board.created_by, SEED_OWNER_EMAIL);
    assert_eq!(board.created_by_name, "Demo User");
    assert!(board.created_at.is_some());
    assert_ne!(board.created_at, stale);
    let ids: Vec<_> = board.columns.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["todo", "inProgress", "done"]);
    let titles: Vec<_> = board.columns.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["할 일", "진행 중", "완료"]);

    assert_eq!(state.boards().last(), Some(&board));
    assert!(state.check_board_access(&board.id).is_ok());

    sync.wait().await.unwrap();
    assert!(gateway.boards().await.iter().any(|b| b.id == board.id));
}

#[tokio::test]
async fn test_save_existing_board_replaces_by_id() {
    let (mut state, gateway) = logged_in_as(SEED_OWNER_EMAIL).await;

    let mut board = state.boards()[0].clone();
    board.title = "Launch v2".to_string();
    let (saved, sync) = state.save_board(board, false);

    assert_eq!(saved.id, "board1");
    assert_eq!(state.boards().len(), 2);
    assert_eq!(state.boards()[0].title, "Launch v2");

    sync.wait().await.unwrap();
    assert_eq!(gateway.boards().await[0].title, "Launch v2");
}

#[tokio::test]
async fn test_update_unknown_board_still_reaches_backend() {
    let (mut state, gateway) = logged_in_as(SEED_OWNER_EMAIL).await;

    let mut ghost = Board::draft("Ghost");
    ghost.id = "ghost".to_string();
    let sync = state.update_board(ghost);

    assert_eq!(state.boards().len(), 2);
    let err = sync.wait().await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(gateway.calls().await.contains(&"update_board:ghost".to_string()));
}

#[tokio::test]
async fn test_delete_board_cascades_locally_and_remotely() {
    let (mut state, gateway) = logged_in_as(SEED_OWNER_EMAIL).await;
    state.select_board(Some("board1".to_string()));

    let sync = state.delete_board("board1");

    assert!(state.boards().iter().all(|b| b.id != "board1"));
    assert!(state.tasks().iter().all(|t| t.board_id != "board1"));
    assert!(state.logs().iter().all(|l| l.board_id != "board1"));
    assert_eq!(state.tasks().len(), 1);
    assert_eq!(state.selected_board_id(), None);

    let report = sync.wait().await.unwrap();
    assert!(report.is_fully_synced());
    assert_eq!(report.tasks.len(), 3);
    assert_eq!(report.logs.len(), 2);

    assert!(gateway.boards().await.iter().all(|b| b.id != "board1"));
    assert!(gateway.tasks().await.iter().all(|t| t.id != "t1"));
    assert!(gateway.logs().await.iter().all(|l| l.id != "l1"));
}

#[tokio::test]
async fn test_cascade_delete_isolates_failures() {
    let (mut state, gateway) = logged_in_as(SEED_OWNER_EMAIL).await;
    gateway.reject("t1").await;

    let report = state.delete_board("board1").wait().await.unwrap();

    assert_eq!(report.failure_count(), 1);
    assert!(report.board.is_ok());
    for (id, result) in &report.tasks {
        assert_eq!(result.is_err(), id == "t1", "unexpected outcome for {}", id);
    }

    // Local state does not roll back
    assert!(state.tasks().iter().all(|t| t.id != "t1"));

    let remote: Vec<_> = gateway.tasks().await.into_iter().map(|t| t.id).collect();
    assert_eq!(remote, vec!["t1", "t4"]);
}

#[tokio::test]
async fn test_delete_board_keeps_unrelated_selection() {
    let (mut state, _gateway) = logged_in_as(SEED_MEMBER_EMAIL).await;
    state.select_board(Some("board2".to_string()));

    drop(state.delete_board("board1"));

    assert_eq!(state.selected_board_id(), Some("board2"));
}

#[tokio::test(start_paused = true)]
async fn test_local_change_is_visible_before_backend_answers() {
    let gateway = Arc::new(MemoryPersistenceGateway::new().with_latency(Duration::from_secs(5)));
    let mut state = BoardState::new(gateway.clone(), Arc::new(LocalAuthGateway::new()), Handle::current());

    let sync = state.add_task(Task::new("board1", "Ship").with_id("t9"));

    assert_eq!(state.tasks().len(), 1);
    assert!(!sync.is_finished());
    assert!(gateway.tasks().await.is_empty());

    sync.wait().await.unwrap();
    assert_eq!(gateway.tasks().await.len(), 1);
}

#[tokio::test]
async fn test_failed_sync_keeps_local_change() {
    let gateway = Arc::new(MemoryPersistenceGateway::new());
    gateway.set_offline(true);
    let mut state = BoardState::new(gateway, Arc::new(LocalAuthGateway::new()), Handle::current());

    let result = state.add_task(Task::new("board1", "Ship").with_id("t9")).wait().await;

    assert_eq!(result, Err(GatewayError::Offline));
    assert_eq!(state.tasks().len(), 1);
}

#[tokio::test]
async fn test_update_task_replaces_or_skips() {
    let (mut state, gateway) = logged_in_as(SEED_OWNER_EMAIL).await;

    let moved = state.tasks()[0].clone().in_column("done");
    let sync = state.update_task(moved).expect("t1 exists");
    assert_eq!(state.tasks()[0].column, "done");
    sync.wait().await.unwrap();

    let unknown = Task::new("board1", "Nope").with_id("missing");
    assert!(state.update_task(unknown).is_none());
    assert!(state.tasks().iter().all(|t| t.id != "missing"));
    assert!(!gateway.calls().await.iter().any(|c| c == "update_task:missing"));
}

#[tokio::test]
async fn test_remove_task() {
    let (mut state, gateway) = logged_in_as(SEED_OWNER_EMAIL).await;

    state.remove_task("t2").wait().await.unwrap();

    assert!(state.tasks().iter().all(|t| t.id != "t2"));
    assert!(gateway.tasks().await.iter().all(|t| t.id != "t2"));
}

#[tokio::test]
async fn test_add_log_prepends() {
    let (mut state, _gateway) = logged_in_as(SEED_OWNER_EMAIL).await;
    state.select_board(Some("board1".to_string()));

    let log = Log::new("board1", "task_created").with_message("Ship created");
    let id = log.id.clone();
    state.add_log(log).wait().await.unwrap();

    assert_eq!(state.logs()[0].id, id);
    assert_eq!(state.board_logs()[0].id, id);
    assert_eq!(state.logs().len(), 4);
}

#[tokio::test]
async fn test_board_access_rules() {
    let (mut state, _gateway) = logged_in_as(SEED_MEMBER_EMAIL).await;

    // Member of board1, creator of board2
    assert!(state.check_board_access("board1").is_ok());
    assert!(state.check_board_access("board2").is_ok());

    let missing = state.check_board_access("nope").unwrap_err();
    assert_eq!(missing, AccessError::NotFound("nope".to_string()));
    assert_eq!(missing.to_string(), "보드를 찾을 수 없습니다.");

    state.logout_user().await.unwrap();
    assert!(state.login_user(SEED_OWNER_EMAIL, SEED_PASSWORD).await.unwrap());
    let denied = state.check_board_access("board2").unwrap_err();
    assert_eq!(denied, AccessError::Forbidden("board2".to_string()));
    assert_eq!(denied.to_string(), "이 보드에 접근할 권한이 없습니다.");
}

#[tokio::test]
async fn test_register_user_once() {
    let (mut state, _gateway, _auth) = seeded();
    state.initialize().await;

    assert!(state.register_user("Sam", "sam@x.com", "pw").await.unwrap());
    assert!(!state.register_user("Sam again", "sam@x.com", "pw").await.unwrap());

    let sams: Vec<_> = state
        .registered_users()
        .iter()
        .filter(|u| u.email == "sam@x.com")
        .collect();
    assert_eq!(sams.len(), 1);
    assert_eq!(sams[0].name, "Sam");
    assert!(!state.is_logged_in());

    // A fresh account sees neither seed board
    assert!(state.login_user("sam@x.com", "pw").await.unwrap());
    assert!(matches!(
        state.check_board_access("board1"),
        Err(AccessError::Forbidden(_))
    ));
}

#[tokio::test]
async fn test_logout_resets_navigation() {
    let (mut state, _gateway) = logged_in_as(SEED_OWNER_EMAIL).await;
    state.set_view(View::Board);
    state.select_board(Some("board1".to_string()));

    state.logout_user().await.unwrap();

    assert!(!state.is_logged_in());
    assert!(state.current_user().is_none());
    assert_eq!(state.current_view(), View::Dashboard);
    assert_eq!(state.selected_board_id(), None);
    // Data stays loaded
    assert_eq!(state.boards().len(), 2);
}

#[tokio::test]
async fn test_update_profile() {
    let (mut state, _gateway) = logged_in_as(SEED_OWNER_EMAIL).await;

    let renamed = User::new("Demo Renamed", SEED_OWNER_EMAIL).with_avatar("https://img/d.png");
    assert!(state.update_profile(renamed.clone()).await.unwrap());

    assert_eq!(state.current_user(), Some(&renamed));
    let registered = state
        .registered_users()
        .iter()
        .find(|u| u.email == SEED_OWNER_EMAIL)
        .unwrap();
    assert_eq!(registered.name, "Demo Renamed");
    assert_eq!(registered.avatar, "https://img/d.png");
}

#[tokio::test]
async fn test_update_profile_requires_login() {
    let (mut state, _gateway, _auth) = seeded();
    state.initialize().await;

    let user = User::new("Nobody", "nobody@x.com");
    assert!(!state.update_profile(user).await.unwrap());
    assert!(state.current_user().is_none());
}

#[tokio::test]
async fn test_register_trims_email_consistently_with_auth() {
    let (mut state, _gateway, auth) = seeded();
    state.initialize().await;

    assert!(state.register_user("Sam", " sam@x.com ", "pw").await.unwrap());
    assert!(state.login_user("sam@x.com", "pw").await.unwrap());
    assert!(state
        .update_profile(User::new("Samuel", "sam@x.com"))
        .await
        .unwrap());

    let local: Vec<_> = state
        .registered_users()
        .iter()
        .map(|u| (u.email.clone(), u.name.clone()))
        .collect();
    let remote: Vec<_> = auth
        .get_all_registered_users()
        .await
        .unwrap()
        .into_iter()
        .map(|u| (u.email, u.name))
        .collect();

    assert_eq!(local, remote);
    assert!(local.contains(&("sam@x.com".to_string(), "Samuel".to_string())));
}

#[test]
fn test_mutations_from_thread_outside_runtime() {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap();
    let gateway = Arc::new(MemoryPersistenceGateway::with_data(
        seed_boards(),
        seed_tasks(),
        seed_logs(),
    ));
    let mut state = BoardState::new(
        gateway.clone(),
        Arc::new(LocalAuthGateway::new()),
        runtime.handle().clone(),
    );

    // Plain test thread, no runtime entered
    assert!(Handle::try_current().is_err());

    let created = state.add_task(Task::new("board1", "Ship").with_id("t9"));
    let removed = state.remove_task("t2");
    let cascade = state.delete_board("board2");

    assert!(state.tasks().iter().any(|t| t.id == "t9"));
    assert!(state.tasks().iter().all(|t| t.id != "t2"));
    assert!(state.boards().iter().all(|b| b.id != "board2"));

    runtime.block_on(async {
        created.wait().await.unwrap();
        removed.wait().await.unwrap();
        assert!(cascade.wait().await.unwrap().is_fully_synced());

        let remote: Vec<_> = gateway.tasks().await.into_iter().map(|t| t.id).collect();
        assert_eq!(remote, vec!["t1", "t3", "t9"]);
    });
}
