use super::config::{AIConfig, DifficultyProfile, SearchParams};
use super::eval::PatternEvaluator;
use super::evaluator::Evaluator;
use super::random::seeded;
use crate::core::{Board, ConfigError, Move, PlayerId};
use crate::logic::generate_candidate_moves;
use crate::player::{PlayerController, TurnAction};

use rand::rngs::StdRng;
use rand::Rng;
use rayon::prelude::*;
use std::cell::RefCell;
use std::time::{Duration, Instant};

/// Search window bound. Validated jitter and weights keep every evaluation
/// strictly inside `(-INFINITY, INFINITY)`, and negation is symmetric.
pub const INFINITY: i32 = i32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// None when the root had no candidate moves
    pub best: Option<Move>,
    pub value: i32,
    /// Number of leaf evaluations
    pub nodes: u64,
}

#[derive(Debug, Clone, Copy)]
struct Node {
    mv: Option<Move>,
    value: i32,
}

/// Negamax with alpha-beta pruning over neighborhood candidates.
///
/// The board is mutated in place; every tentative stone is held by a
/// [`crate::core::TentativeStone`] guard, so it is lifted again on every exit
/// path including beta cutoffs.
pub struct AlphaBeta<'a, E: Evaluator + ?Sized> {
    evaluator: &'a mut E,
    root_depth: u32,
    radius: usize,
    nodes: u64,
}

impl<'a, E: Evaluator + ?Sized> AlphaBeta<'a, E> {
    pub fn new(evaluator: &'a mut E, params: SearchParams) -> Self {
        Self {
            evaluator,
            root_depth: params.depth,
            radius: params.radius,
            nodes: 0,
        }
    }

    pub fn search(mut self, board: &mut Board, side: PlayerId, last: Move) -> SearchResult {
        log::debug!(
            "{} search for {}: depth {}, radius {}",
            self.evaluator.name(),
            side,
            self.root_depth,
            self.radius
        );
        let root = self.negamax(board, -INFINITY, INFINITY, self.root_depth, side, last);
        SearchResult {
            best: root.mv,
            value: root.value,
            nodes: self.nodes,
        }
    }

    fn leaf(&mut self, board: &Board, side: PlayerId, last: Move) -> Node {
        self.nodes += 1;
        Node {
            mv: None,
            value: self.evaluator.evaluate(board, side, last),
        }
    }

    fn negamax(
        &mut self,
        board: &mut Board,
        mut alpha: i32,
        beta: i32,
        depth: u32,
        side: PlayerId,
        last: Move,
    ) -> Node {
        if depth == 0 {
            return self.leaf(board, side, last);
        }

        let moves = generate_candidate_moves(board, last, self.radius);
        if moves.is_empty() {
            return self.leaf(board, side, last);
        }

        let is_root = depth == self.root_depth;
        let mut best = None;

        for mv in moves {
            let value = {
                let mut stone = board.tentative(mv, side);
                -self
                    .negamax(&mut stone, -beta, -alpha, depth - 1, -side, mv)
                    .value
            };

            if value >= beta {
                return Node {
                    mv: Some(mv),
                    value: beta,
                };
            }
            if value > alpha {
                alpha = value;
                if is_root {
                    best = Some(mv);
                }
            }
        }

        Node {
            mv: if is_root { best } else { None },
            value: alpha,
        }
    }
}

/// Splits the root candidates across rayon workers.
///
/// Each worker gets its own copy of the board and its own evaluator from
/// `make_evaluator(index)`, and searches its subtree with a full window. The
/// merge keeps the highest value, earliest candidate on ties, which is the same
/// move the sequential search picks.
pub fn search_parallel<F, E>(
    board: &Board,
    params: SearchParams,
    side: PlayerId,
    last: Move,
    make_evaluator: F,
) -> SearchResult
where
    F: Fn(usize) -> E + Sync,
    E: Evaluator,
{
    let moves = generate_candidate_moves(board, last, params.radius);
    if params.depth == 0 || moves.is_empty() {
        let mut evaluator = make_evaluator(0);
        return SearchResult {
            best: None,
            value: evaluator.evaluate(board, side, last),
            nodes: 1,
        };
    }

    let scored: Vec<(Move, i32, u64)> = moves
        .par_iter()
        .enumerate()
        .map(|(i, &mv)| {
            let mut evaluator = make_evaluator(i);
            let mut search = AlphaBeta::new(&mut evaluator, params);
            let mut work = board.clone();
            let mut stone = work.tentative(mv, side);
            let child = search.negamax(&mut stone, -INFINITY, INFINITY, params.depth - 1, -side, mv);
            (mv, -child.value, search.nodes)
        })
        .collect();

    let mut result = SearchResult {
        best: None,
        value: -INFINITY,
        nodes: 0,
    };
    for (mv, value, nodes) in scored {
        result.nodes += nodes;
        if value > result.value {
            result.value = value;
            result.best = Some(mv);
        }
    }
    result
}

/// Chooses a move for `ai` after the opponent played `last`.
///
/// The profile is validated before anything is searched. The board is handed
/// back exactly as it came in. `Ok(None)` means there was nothing to play near
/// `last`; the caller should check for a draw.
pub fn choose_move<R: Rng>(
    board: &mut Board,
    profile: &DifficultyProfile,
    ai: PlayerId,
    last: Move,
    rng: R,
) -> Result<Option<Move>, ConfigError> {
    let params = profile.validate()?;
    let weights = AIConfig::get().evaluation.pattern_weights.clone();
    let mut evaluator = PatternEvaluator::new(weights, params.jitter, rng);

    let started = Instant::now();
    let result = AlphaBeta::new(&mut evaluator, params).search(board, ai, last);
    log_search(&profile.name, &result, started.elapsed());

    Ok(result.best)
}

fn log_search(label: &str, result: &SearchResult, elapsed: Duration) {
    match result.best {
        Some(mv) => log::info!(
            "[AI] {} | nodes: {} | move: {} | value: {} | {:.1}ms",
            label,
            result.nodes,
            mv,
            result.value,
            elapsed.as_secs_f64() * 1000.0
        ),
        None => log::info!("[AI] {} | no candidate move", label),
    }
}

pub struct AlphaBetaAI {
    player_id: PlayerId,
    name: String,
    profile: DifficultyProfile,
    params: SearchParams,
    rng: RefCell<StdRng>,
    nodes_evaluated: RefCell<u64>,
    parallel: bool,
}

impl AlphaBetaAI {
    pub fn new(
        player_id: PlayerId,
        name: &str,
        profile: DifficultyProfile,
    ) -> Result<Self, ConfigError> {
        Self::with_seed(player_id, name, profile, rand::thread_rng().gen())
    }

    pub fn with_seed(
        player_id: PlayerId,
        name: &str,
        profile: DifficultyProfile,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        let params = profile.validate()?;
        Ok(Self {
            player_id,
            name: name.to_string(),
            profile,
            params,
            rng: RefCell::new(seeded(seed)),
            nodes_evaluated: RefCell::new(0),
            parallel: false,
        })
    }

    /// Search root candidates on the rayon pool
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    pub fn nodes_evaluated(&self) -> u64 {
        *self.nodes_evaluated.borrow()
    }

    fn think(&self, board: &Board) -> Option<Move> {
        let last = match board.last_move() {
            Some(placement) => placement.mv,
            None if board.is_empty_at(Move::center()) => return Some(Move::center()),
            None => Move::center(),
        };

        let started = Instant::now();
        let weights = AIConfig::get().evaluation.pattern_weights.clone();
        let result = if self.parallel {
            let base: u64 = self.rng.borrow_mut().gen();
            let jitter = self.params.jitter;
            let weights = &weights;
            search_parallel(board, self.params, self.player_id, last, move |i| {
                PatternEvaluator::new(weights.clone(), jitter, seeded(base.wrapping_add(i as u64)))
            })
        } else {
            let mut work = board.clone();
            let mut rng = self.rng.borrow_mut();
            let mut evaluator = PatternEvaluator::new(weights, self.params.jitter, &mut *rng);
            AlphaBeta::new(&mut evaluator, self.params).search(&mut work, self.player_id, last)
        };
        log_search(&self.profile.name, &result, started.elapsed());

        *self.nodes_evaluated.borrow_mut() = result.nodes;
        result.best
    }
}

impl PlayerController for AlphaBetaAI {
    fn choose_move(&self, board: &Board) -> TurnAction {
        match self.think(board) {
            Some(mv) => TurnAction::Place(mv),
            None => TurnAction::Pass,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_ai(&self) -> bool {
        true
    }

    fn response_delay(&self) -> Duration {
        Duration::from_millis(self.profile.response_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::ai::config::{Difficulty, PatternWeights, MAX_JITTER};
    use crate::player::ai::minimax::minimax;

    fn quiet() -> PatternEvaluator<StdRng> {
        PatternEvaluator::new(PatternWeights::default(), 0, seeded(0))
    }

    fn params(depth: u32, radius: usize) -> SearchParams {
        SearchParams {
            depth,
            radius,
            jitter: 0,
        }
    }

    fn sample_board() -> Board {
        let mut board = Board::new();
        let stones = [
            (7, 7, PlayerId::Player1),
            (8, 7, PlayerId::Player2),
            (7, 8, PlayerId::Player1),
            (6, 6, PlayerId::Player2),
            (7, 6, PlayerId::Player1),
        ];
        for (x, y, p) in stones {
            board.place(Move::new(x, y), p).unwrap();
        }
        board
    }

    #[test]
    fn test_board_is_restored() {
        let mut board = sample_board();
        let before = board.clone();
        let mut eval = quiet();
        let result = AlphaBeta::new(&mut eval, params(3, 2)).search(
            &mut board,
            PlayerId::Player2,
            Move::new(7, 6),
        );

        assert!(result.best.is_some());
        assert_eq!(board, before);
    }

    #[test]
    fn test_matches_exhaustive_minimax() {
        let positions = [
            (sample_board(), PlayerId::Player2, Move::new(7, 6)),
            (sample_board(), PlayerId::Player2, Move::new(0, 0)),
            (sample_board(), PlayerId::Player1, Move::new(8, 7)),
        ];

        for (board, side, last) in positions.iter() {
            for depth in 1..=3 {
                let p = params(depth, 2);

                let mut b1 = board.clone();
                let mut e1 = quiet();
                let pruned = AlphaBeta::new(&mut e1, p).search(&mut b1, *side, *last);

                let mut b2 = board.clone();
                let mut e2 = quiet();
                let full = minimax(&mut b2, p, &mut e2, *side, *last);

                assert_eq!(pruned.best, full.best, "depth {} from {}", depth, last);
                assert_eq!(pruned.value, full.value, "depth {} from {}", depth, last);
                assert!(pruned.nodes <= full.nodes);
            }
        }
    }

    #[test]
    fn test_pruning_saves_nodes() {
        let mut b1 = sample_board();
        let mut e1 = quiet();
        let pruned = AlphaBeta::new(&mut e1, params(3, 2)).search(
            &mut b1,
            PlayerId::Player2,
            Move::new(7, 6),
        );

        let mut b2 = sample_board();
        let mut e2 = quiet();
        let full = minimax(&mut b2, params(3, 2), &mut e2, PlayerId::Player2, Move::new(7, 6));

        assert!(pruned.nodes < full.nodes);
    }

    #[test]
    fn test_parallel_root_matches_sequential() {
        let board = sample_board();
        for depth in 1..=2 {
            let p = params(depth, 2);
            let mut work = board.clone();
            let mut eval = quiet();
            let sequential =
                AlphaBeta::new(&mut eval, p).search(&mut work, PlayerId::Player2, Move::new(7, 6));

            let parallel = search_parallel(&board, p, PlayerId::Player2, Move::new(7, 6), |_| quiet());

            assert_eq!(parallel.best, sequential.best);
            assert_eq!(parallel.value, sequential.value);
        }
    }

    #[test]
    fn test_parallel_depth_zero_is_a_leaf() {
        let board = sample_board();
        let mut work = board.clone();
        let mut eval = quiet();
        let sequential =
            AlphaBeta::new(&mut eval, params(0, 2)).search(&mut work, PlayerId::Player2, Move::new(7, 6));
        let parallel = search_parallel(&board, params(0, 2), PlayerId::Player2, Move::new(7, 6), |_| quiet());

        assert_eq!(parallel, sequential);
        assert_eq!(parallel.best, None);
        assert_eq!(parallel.nodes, 1);
    }

    #[test]
    fn test_no_candidates_means_no_move() {
        let mut board = Board::new();
        board.place(Move::new(0, 0), PlayerId::Player1).unwrap();
        let mut eval = quiet();
        let result =
            AlphaBeta::new(&mut eval, params(2, 0)).search(&mut board, PlayerId::Player2, Move::new(0, 0));

        assert_eq!(result.best, None);
        assert_eq!(result.nodes, 1);
    }

    #[test]
    fn test_takes_immediate_win() {
        let mut board = Board::new();
        for y in 3..7 {
            board.place(Move::new(3, y), PlayerId::Player2).unwrap();
            board.place(Move::new(9, y + 5), PlayerId::Player1).unwrap();
        }
        // Player2 to move with four in a column; (3, 7) and (3, 2) both complete five.
        let mut eval = quiet();
        let result =
            AlphaBeta::new(&mut eval, params(1, 4)).search(&mut board, PlayerId::Player2, Move::new(3, 6));

        let best = result.best.unwrap();
        assert!(best == Move::new(3, 7) || best == Move::new(3, 2), "got {}", best);
    }

    #[test]
    fn test_choose_move_is_idempotent_without_jitter() {
        let profile = DifficultyProfile::new("test", 2, 3, 0, 0);
        let mut board = sample_board();
        let before = board.clone();

        let first = choose_move(&mut board, &profile, PlayerId::Player2, Move::new(7, 6), seeded(1)).unwrap();
        let second = choose_move(&mut board, &profile, PlayerId::Player2, Move::new(7, 6), seeded(99)).unwrap();

        assert!(first.is_some());
        assert_eq!(first, second);
        assert_eq!(board, before);
    }

    #[test]
    fn test_strong_negative_jitter_still_picks_a_move() {
        let profile = DifficultyProfile::new("noisy", 1, 1, -MAX_JITTER, 0);
        let mut board = Board::new();
        board.place(Move::center(), PlayerId::Player1).unwrap();

        for seed in 0..50 {
            let mv = choose_move(&mut board, &profile, PlayerId::Player2, Move::center(), seeded(seed))
                .unwrap()
                .unwrap_or_else(|| panic!("no move with seed {}", seed));
            assert!(board.is_empty_at(mv));
        }

        for depth in 1..=2 {
            let mut eval = PatternEvaluator::new(PatternWeights::default(), -MAX_JITTER, seeded(depth as u64));
            let p = SearchParams {
                depth,
                radius: 1,
                jitter: -MAX_JITTER,
            };
            let parallel = search_parallel(&board, p, PlayerId::Player2, Move::center(), |i| {
                PatternEvaluator::new(PatternWeights::default(), -MAX_JITTER, seeded(i as u64))
            });
            let sequential = AlphaBeta::new(&mut eval, p).search(&mut board, PlayerId::Player2, Move::center());
            assert!(sequential.best.is_some());
            assert!(parallel.best.is_some());
        }
    }

    #[test]
    fn test_choose_move_rejects_bad_profile() {
        let mut board = sample_board();
        let bad_depth = DifficultyProfile::new("bad", 0, 3, 0, 0);
        assert_eq!(
            choose_move(&mut board, &bad_depth, PlayerId::Player2, Move::new(7, 6), seeded(1)),
            Err(ConfigError::NonPositiveDepth(0))
        );

        let bad_radius = DifficultyProfile::new("bad", 1, -2, 0, 0);
        assert_eq!(
            choose_move(&mut board, &bad_radius, PlayerId::Player2, Move::new(7, 6), seeded(1)),
            Err(ConfigError::NegativeRadius(-2))
        );
        assert!(AlphaBetaAI::new(PlayerId::Player2, "AI", bad_radius).is_err());
    }

    #[test]
    fn test_ai_opens_in_the_center() {
        let ai = AlphaBetaAI::with_seed(
            PlayerId::Player1,
            "AI",
            Difficulty::Expert.default_profile(),
            7,
        )
        .unwrap();
        assert_eq!(ai.choose_move(&Board::new()), TurnAction::Place(Move::center()));
    }

    #[test]
    fn test_ai_controller_plays_empty_cell() {
        let board = sample_board();
        for parallel in [false, true] {
            let ai = AlphaBetaAI::with_seed(
                PlayerId::Player2,
                "AI",
                Difficulty::Advanced.default_profile(),
                3,
            )
            .unwrap()
            .parallel(parallel);

            match ai.choose_move(&board) {
                TurnAction::Place(mv) => assert!(board.is_empty_at(mv)),
                other => panic!("unexpected action {:?}", other),
            }
            assert!(ai.nodes_evaluated() > 0);
        }
    }
}
