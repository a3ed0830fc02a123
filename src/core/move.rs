use super::types::{PlayerId, BOARD_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 盤面座標 (0-indexed)。x が列、y が行。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Move {
    pub x: usize,
    pub y: usize,
}

impl Move {
    pub fn new(x: usize, y: usize) -> Self {
        Move { x, y }
    }

    /// 盤の中央 (7, 7)
    pub fn center() -> Self {
        Move::new(BOARD_SIZE / 2, BOARD_SIZE / 2)
    }

    pub fn in_bounds(&self) -> bool {
        self.x < BOARD_SIZE && self.y < BOARD_SIZE
    }

    /// `steps` マス先の座標。盤外なら None。
    pub fn offset(self, dx: isize, dy: isize, steps: usize) -> Option<Move> {
        let steps = steps as isize;
        let nx = self.x as isize + dx * steps;
        let ny = self.y as isize + dy * steps;
        let size = BOARD_SIZE as isize;
        if nx >= 0 && nx < size && ny >= 0 && ny < size {
            Some(Move::new(nx as usize, ny as usize))
        } else {
            None
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 履歴の1手 (誰がどこに置いたか)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub mv: Move,
    pub player: PlayerId,
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.player, self.mv)
    }
}
