use crate::core::{Board, Move};
use std::time::Duration;

/// 手番で選べる行動
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    Place(Move),
    /// 待った
    Regret,
    /// 置ける場所が無い (AI のみ)
    Pass,
    Resign,
}

/// プレイヤー操作のtrait
pub trait PlayerController {
    fn choose_move(&self, board: &Board) -> TurnAction;
    fn name(&self) -> &str;
    fn is_ai(&self) -> bool;

    /// 着手を表示するまでの待ち時間
    fn response_delay(&self) -> Duration {
        Duration::ZERO
    }
}
