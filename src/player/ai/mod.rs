pub mod alpha_beta;
pub mod config;
pub mod eval;
pub mod evaluator;
pub mod minimax;
pub mod random;

pub use alpha_beta::{choose_move, search_parallel, AlphaBeta, AlphaBetaAI, SearchResult};
pub use config::{AIConfig, Difficulty, DifficultyProfile, PatternWeights, SearchParams};
pub use eval::PatternEvaluator;
pub use evaluator::Evaluator;
