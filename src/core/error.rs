use super::r#move::Move;
use thiserror::Error;

/// 着手できないマスへの着手
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("cell {0} is already occupied")]
    Occupied(Move),
    #[error("cell {0} is outside the 15x15 board")]
    OutOfBounds(Move),
}

/// 対局進行中のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Illegal(#[from] IllegalMove),
    #[error("the game is already over")]
    GameOver,
    #[error("no regrets left")]
    NoRegretsLeft,
    #[error("not enough moves to undo")]
    NothingToUndo,
}

/// 難易度設定の不正値
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("search depth must be positive, got {0}")]
    NonPositiveDepth(i32),
    #[error("neighborhood radius must not be negative, got {0}")]
    NegativeRadius(i32),
    #[error("jitter magnitude {0} is outside the allowed range")]
    JitterOutOfRange(i32),
    #[error("pattern weight {0} is outside the allowed range")]
    WeightOutOfRange(i32),
    #[error("unknown difficulty `{0}`")]
    UnknownDifficulty(String),
}
