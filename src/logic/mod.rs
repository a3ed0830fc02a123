//! 五目並べのルール判定
//!
//! 盤面に対する純粋関数群: 候補手生成、勝利判定、引き分け判定。

use crate::core::{Board, IllegalMove, Move, PlayerId, BOARD_SIZE};

/// 横・縦・右下がり斜め・右上がり斜め
pub const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// 勝利に必要な連の長さ
pub const WIN_LENGTH: usize = 5;

/// 対局の決着
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win(PlayerId),
    Draw,
}

/// 一方向への走査結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ray {
    /// 起点を含まない同色の連続数
    pub stones: usize,
    /// 連の先が盤内の空きマスか
    pub open: bool,
}

/// 着手を盤面に適用する
pub fn apply_move(board: &mut Board, mv: Move, player: PlayerId) -> Result<(), IllegalMove> {
    board.place(mv, player)
}

/// `origin` から (dx, dy) 方向に `owner` の石が何個続くかを数える。起点自身は数えない。
pub fn scan_ray(board: &Board, origin: Move, dx: isize, dy: isize, owner: PlayerId) -> Ray {
    let mut stones = 0;
    for step in 1..BOARD_SIZE {
        match origin.offset(dx, dy, step) {
            None => return Ray { stones, open: false },
            Some(cell) => match board.at(cell) {
                Some(p) if p == owner => stones += 1,
                Some(_) => return Ray { stones, open: false },
                None => return Ray { stones, open: true },
            },
        }
    }
    Ray { stones, open: false }
}

/// 直前の着手 `last` を中心とした (2r+1)^2 の範囲の空きマスを行優先で列挙する
pub fn generate_candidate_moves(board: &Board, last: Move, radius: usize) -> Vec<Move> {
    let max = BOARD_SIZE - 1;
    let min_x = last.x.saturating_sub(radius);
    let max_x = (last.x + radius).min(max);
    let min_y = last.y.saturating_sub(radius);
    let max_y = (last.y + radius).min(max);

    let mut moves = Vec::new();
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let mv = Move::new(x, y);
            if board.is_empty_at(mv) {
                moves.push(mv);
            }
        }
    }
    moves
}

/// `mv` に置かれた石を含む五連があるか (盤面全体は走査しない)
pub fn check_win(board: &Board, mv: Move) -> bool {
    let owner = match board.at(mv) {
        Some(p) => p,
        None => return false,
    };

    DIRECTIONS.iter().any(|&(dx, dy)| {
        let forward = scan_ray(board, mv, dx, dy, owner).stones;
        let backward = scan_ray(board, mv, -dx, -dy, owner).stones;
        1 + forward + backward >= WIN_LENGTH
    })
}

/// 盤面が埋まったか。`check_win` が偽を返した後にだけ意味を持つ。
pub fn check_draw(board: &Board) -> bool {
    board.is_full()
}

/// 直前の着手後の決着判定
pub fn outcome_after(board: &Board, last: Move) -> Option<Outcome> {
    if check_win(board, last) {
        board.at(last).map(Outcome::Win)
    } else if check_draw(board) {
        Some(Outcome::Draw)
    } else {
        None
    }
}
