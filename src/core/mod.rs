pub mod board;
pub mod error;
pub mod r#move;
pub mod types;

pub use board::{Board, Grid, TentativeStone};
pub use error::{ConfigError, GameError, IllegalMove};
pub use r#move::{Move, Placement};
pub use types::{PlayerId, BOARD_SIZE};
