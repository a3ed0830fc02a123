//! Five-in-a-row (Gomoku) on a 15x15 board: rules, a pattern evaluator and a
//! negamax alpha-beta AI, plus a small terminal front end.

pub mod core;
pub mod display;
pub mod game;
pub mod logic;
pub mod player;
pub mod selfplay;


pub use crate::core::{Board, ConfigError, GameError, IllegalMove, Move, PlayerId};
pub use crate::logic::{apply_move, check_draw, check_win, generate_candidate_moves, Outcome};
pub use crate::player::ai::choose_move;
