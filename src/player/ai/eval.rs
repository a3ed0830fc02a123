//! # Evaluation Module
//!
//! Static evaluation of a Gomoku position around a single anchor cell
//! (normally the most recent move).
//!
//! ## Scoring Strategy
//! For each of the four line directions the evaluator measures the run of
//! stones through the anchor and how many of its two ends are still open,
//! then looks the pair up in a [`PatternWeights`] table. A five scores so much
//! (88888) that it acts as a win for any practical search depth.
//!
//! A random jitter is added to every score. Weak tiers use a negative jitter
//! large enough to drown out the pattern signal.

use super::config::PatternWeights;
use super::evaluator::Evaluator;
use super::random::draw_jitter;
use crate::core::{Board, Move, PlayerId};
use crate::logic::{scan_ray, DIRECTIONS};
use rand::Rng;

/// Pattern-table evaluator with an injected random source
pub struct PatternEvaluator<R: Rng> {
    weights: PatternWeights,
    jitter_magnitude: i32,
    rng: R,
}

impl<R: Rng> PatternEvaluator<R> {
    pub fn new(weights: PatternWeights, jitter_magnitude: i32, rng: R) -> Self {
        Self {
            weights,
            jitter_magnitude,
            rng,
        }
    }

    /// Directional pattern score for `player` anchored at `anchor`.
    ///
    /// The anchor always counts as one stone of the run, whoever owns it.
    pub fn score(&mut self, board: &Board, player: PlayerId, anchor: Move) -> i32 {
        let mut score = draw_jitter(&mut self.rng, self.jitter_magnitude);

        for &(dx, dy) in DIRECTIONS.iter() {
            let forward = scan_ray(board, anchor, dx, dy, player);
            let backward = scan_ray(board, anchor, -dx, -dy, player);

            let run = 1 + forward.stones + backward.stones;
            let open = forward.open as usize + backward.open as usize;
            score += self.weights.weight(run, open);
        }

        score
    }
}

impl<R: Rng> Evaluator for PatternEvaluator<R> {
    fn evaluate(&mut self, board: &Board, side: PlayerId, anchor: Move) -> i32 {
        let sum = self.score(board, side, anchor) + self.score(board, -side, anchor);
        if side.is_negative() {
            -sum
        } else {
            sum
        }
    }

    fn name(&self) -> &str {
        "pattern"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::ai::random::seeded;
    use rand::rngs::StdRng;

    fn quiet() -> PatternEvaluator<StdRng> {
        PatternEvaluator::new(PatternWeights::default(), 0, seeded(0))
    }

    #[test]
    fn test_lone_stone_in_the_middle() {
        let mut board = Board::new();
        board.place(Move::new(7, 7), PlayerId::Player1).unwrap();
        // Four directions, run 1, both ends open: (1, 2) is untabulated.
        assert_eq!(quiet().score(&board, PlayerId::Player1, Move::new(7, 7)), 0);
    }

    #[test]
    fn test_corner_stone() {
        let mut board = Board::new();
        board.place(Move::new(0, 0), PlayerId::Player1).unwrap();
        // Horizontal, vertical and the main diagonal have one open end (weight 2).
        // The anti-diagonal is closed on both sides by the edge (weight 1).
        assert_eq!(quiet().score(&board, PlayerId::Player1, Move::new(0, 0)), 7);
    }

    #[test]
    fn test_all_corners_stay_in_bounds() {
        let mut eval = quiet();
        for &(x, y) in &[(0, 0), (0, 14), (14, 0), (14, 14)] {
            let mut board = Board::new();
            let corner = Move::new(x, y);
            board.place(corner, PlayerId::Player2).unwrap();
            assert_eq!(eval.score(&board, PlayerId::Player2, corner), 7);
        }
    }

    #[test]
    fn test_blocked_four() {
        let mut board = Board::new();
        for x in 0..4 {
            board.place(Move::new(x, 7), PlayerId::Player1).unwrap();
        }
        // Horizontal: run 4, edge on the left, open on the right -> 100.
        // The other directions through (3, 7) are lone stones with two open ends -> 0.
        assert_eq!(quiet().score(&board, PlayerId::Player1, Move::new(3, 7)), 100);

        board.place(Move::new(4, 7), PlayerId::Player2).unwrap();
        assert_eq!(quiet().score(&board, PlayerId::Player1, Move::new(3, 7)), 60);
    }

    #[test]
    fn test_five_dominates() {
        let mut board = Board::new();
        for y in 3..8 {
            board.place(Move::new(3, y), PlayerId::Player1).unwrap();
        }
        let score = quiet().score(&board, PlayerId::Player1, Move::new(3, 5));
        assert_eq!(score, 88888);
    }

    #[test]
    fn test_run_is_capped_at_five() {
        let mut board = Board::new();
        for x in 2..9 {
            board.place(Move::new(x, 0), PlayerId::Player1).unwrap();
        }
        let mut eval = quiet();
        let seven = eval.score(&board, PlayerId::Player1, Move::new(5, 0));
        // Horizontal five (88888), the other three directions are lone stones
        // with the top edge closing one end (2 each).
        assert_eq!(seven, 88888 + 2 + 2 + 2);
    }

    #[test]
    fn test_evaluate_sign_folding() {
        let mut board = Board::new();
        board.place(Move::new(0, 0), PlayerId::Player1).unwrap();
        let anchor = Move::new(0, 0);
        let mut eval = quiet();

        // Both sides see 7 through the corner; only the negative side flips the sum.
        let white = eval.evaluate(&board, PlayerId::Player2, anchor);
        let black = eval.evaluate(&board, PlayerId::Player1, anchor);
        assert_eq!(white, 14);
        assert_eq!(black, -14);
    }

    #[test]
    fn test_jitter_bounds() {
        let board = Board::new();
        let anchor = Move::new(7, 7);
        let mut eval = PatternEvaluator::new(PatternWeights::default(), 3, seeded(11));
        for _ in 0..200 {
            let s = eval.score(&board, PlayerId::Player1, anchor);
            assert!((0..3).contains(&s));
        }

        let mut weak = PatternEvaluator::new(PatternWeights::default(), -60, seeded(12));
        for _ in 0..200 {
            let s = weak.score(&board, PlayerId::Player1, anchor);
            assert!((-60..0).contains(&s));
        }
    }
}
