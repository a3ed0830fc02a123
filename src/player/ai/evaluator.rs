//! Evaluator trait for board evaluation
//!
//! Defines a common interface for different evaluation strategies.

use crate::core::{Board, Move, PlayerId};

/// Trait for evaluating board positions
pub trait Evaluator {
    /// Evaluate the board around `anchor` (usually the last move) for `side`.
    ///
    /// The result is already folded into negamax form, so the search can use it
    /// directly as the value of a leaf node.
    fn evaluate(&mut self, board: &Board, side: PlayerId, anchor: Move) -> i32;

    /// Get evaluator name for debugging
    fn name(&self) -> &str;
}
