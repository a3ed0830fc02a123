use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Neg;

/// 盤の一辺のマス数
pub const BOARD_SIZE: usize = 15;

/// プレイヤーID
///
/// 符号付きの識別子としては Player1 (黒, 先手) が -1、Player2 (白, 後手) が +1。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    Player1, // 黒 (先手)
    Player2, // 白 (後手)
}

impl Default for PlayerId {
    fn default() -> Self {
        PlayerId::Player1
    }
}

impl PlayerId {
    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::Player1 => PlayerId::Player2,
            PlayerId::Player2 => PlayerId::Player1,
        }
    }

    /// Signed identity tag: -1 for Player1 (black), +1 for Player2 (white).
    pub fn sign(self) -> i32 {
        match self {
            PlayerId::Player1 => -1,
            PlayerId::Player2 => 1,
        }
    }

    pub fn is_negative(self) -> bool {
        self.sign() < 0
    }

    pub fn stone_char(self) -> char {
        match self {
            PlayerId::Player1 => '●',
            PlayerId::Player2 => '○',
        }
    }
}

impl Neg for PlayerId {
    type Output = PlayerId;

    fn neg(self) -> PlayerId {
        self.opponent()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlayerId::Player1 => write!(f, "Black"),
            PlayerId::Player2 => write!(f, "White"),
        }
    }
}
