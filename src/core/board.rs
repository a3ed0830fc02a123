use super::error::IllegalMove;
use super::r#move::{Move, Placement};
use super::types::{PlayerId, BOARD_SIZE};
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

pub type Grid = [[Option<PlayerId>; BOARD_SIZE]; BOARD_SIZE];

/// 盤面
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// `cells[y][x]`
    cells: Grid,
    /// 着手履歴
    history: Vec<Placement>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Board {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
            history: Vec::new(),
        }
    }

    /// 石を置いて履歴に積む。置けない場合は盤面を変更しない。
    pub fn place(&mut self, mv: Move, player: PlayerId) -> Result<(), IllegalMove> {
        if !mv.in_bounds() {
            return Err(IllegalMove::OutOfBounds(mv));
        }
        if self.cells[mv.y][mv.x].is_some() {
            return Err(IllegalMove::Occupied(mv));
        }
        self.cells[mv.y][mv.x] = Some(player);
        self.history.push(Placement { mv, player });
        Ok(())
    }

    /// マスを空に戻す。履歴は参照しない。
    pub fn remove(&mut self, mv: Move) -> Option<PlayerId> {
        if !mv.in_bounds() {
            return None;
        }
        self.cells[mv.y][mv.x].take()
    }

    /// 直前の着手を取り消す (待った)
    pub fn undo(&mut self) -> Option<Placement> {
        let last = self.history.pop()?;
        self.cells[last.mv.y][last.mv.x] = None;
        Some(last)
    }

    pub fn at(&self, mv: Move) -> Option<PlayerId> {
        if mv.in_bounds() {
            self.cells[mv.y][mv.x]
        } else {
            None
        }
    }

    pub fn is_empty_at(&self, mv: Move) -> bool {
        mv.in_bounds() && self.cells[mv.y][mv.x].is_none()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    pub fn stone_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    pub fn history(&self) -> &[Placement] {
        &self.history
    }

    pub fn last_move(&self) -> Option<Placement> {
        self.history.last().copied()
    }

    pub fn grid(&self) -> &Grid {
        &self.cells
    }

    pub fn clear(&mut self) {
        self.cells = [[None; BOARD_SIZE]; BOARD_SIZE];
        self.history.clear();
    }

    /// 探索用の仮置き。返り値が drop されると石は取り除かれる。
    ///
    /// 履歴には積まないので、ガードが外れた時点で盤面は仮置き前と完全に一致する。
    pub fn tentative(&mut self, mv: Move, player: PlayerId) -> TentativeStone<'_> {
        debug_assert!(self.is_empty_at(mv), "tentative stone on occupied cell {}", mv);
        self.cells[mv.y][mv.x] = Some(player);
        TentativeStone { board: self, mv }
    }
}

/// 仮置きした石のガード
pub struct TentativeStone<'a> {
    board: &'a mut Board,
    mv: Move,
}

impl Deref for TentativeStone<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for TentativeStone<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for TentativeStone<'_> {
    fn drop(&mut self) {
        self.board.remove(self.mv);
    }
}
