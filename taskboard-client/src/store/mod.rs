/// Client-side board state and its sync handles

pub mod board_state;
pub mod sync;

pub use board_state::{BoardState, View};
pub use sync::{CascadeDeleteReport, LoadSource, PendingSync};
