//! Exhaustive negamax without pruning.
//!
//! Uses the same candidate generator and evaluator contract as
//! [`super::alpha_beta::AlphaBeta`], so both must agree on move and value.

use super::alpha_beta::{SearchResult, INFINITY};
use super::config::SearchParams;
use super::evaluator::Evaluator;
use crate::core::{Board, Move, PlayerId};
use crate::logic::generate_candidate_moves;

pub fn minimax<E: Evaluator + ?Sized>(
    board: &mut Board,
    params: SearchParams,
    evaluator: &mut E,
    side: PlayerId,
    last: Move,
) -> SearchResult {
    let mut nodes = 0;
    let moves = generate_candidate_moves(board, last, params.radius);
    if params.depth == 0 || moves.is_empty() {
        return SearchResult {
            best: None,
            value: evaluator.evaluate(board, side, last),
            nodes: 1,
        };
    }

    let mut best = None;
    let mut best_value = -INFINITY;
    for mv in moves {
        let mut stone = board.tentative(mv, side);
        let value = -negamax(
            &mut stone,
            params.depth - 1,
            params.radius,
            evaluator,
            -side,
            mv,
            &mut nodes,
        );
        if value > best_value {
            best_value = value;
            best = Some(mv);
        }
    }

    SearchResult {
        best,
        value: best_value,
        nodes,
    }
}

fn negamax<E: Evaluator + ?Sized>(
    board: &mut Board,
    depth: u32,
    radius: usize,
    evaluator: &mut E,
    side: PlayerId,
    last: Move,
    nodes: &mut u64,
) -> i32 {
    if depth == 0 {
        *nodes += 1;
        return evaluator.evaluate(board, side, last);
    }

    let moves = generate_candidate_moves(board, last, radius);
    if moves.is_empty() {
        *nodes += 1;
        return evaluator.evaluate(board, side, last);
    }

    let mut best = -INFINITY;
    for mv in moves {
        let mut stone = board.tentative(mv, side);
        let value = -negamax(&mut stone, depth - 1, radius, evaluator, -side, mv, nodes);
        best = best.max(value);
    }
    best
}
