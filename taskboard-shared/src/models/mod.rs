/// Data model shared by the client state and its gateways
///
/// # Models
///
/// - `user`: user profiles and generated avatars
/// - `board`: boards, columns and members
/// - `task`: tasks placed in board columns
/// - `log`: board activity entries
///
/// All models serialize with the camelCase field names used by the remote API.

pub mod board;
pub mod log;
pub mod task;
pub mod user;

pub use board::{default_columns, Board, Column, Member};
pub use log::Log;
pub use task::Task;
pub use user::User;
