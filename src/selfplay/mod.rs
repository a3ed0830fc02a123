use crate::core::{PlayerId, BOARD_SIZE};
use crate::game::{Game, GameMode, KifuData};
use crate::logic::Outcome;
use crate::player::ai::{AlphaBetaAI, Difficulty};
use crate::player::PlayerController;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Instant;

/// 打ち切りまでの手番数の上限
const MAX_TURNS: usize = BOARD_SIZE * BOARD_SIZE * 2;

pub struct SelfPlayConfig {
    pub num_games: usize,
    pub black: Difficulty,
    pub white: Difficulty,
    pub save_kifus: bool,
    pub kifu_dir: PathBuf,
    /// Some なら各対局の乱数を `seed + 対局番号` で固定する
    pub seed: Option<u64>,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            black: Difficulty::Advanced,
            white: Difficulty::Advanced,
            save_kifus: false,
            kifu_dir: PathBuf::from("selfplay_kifu"),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Option<PlayerId>,
    /// 両者がパスし合うなどして決着しないまま打ち切った
    pub aborted: bool,
    pub moves: usize,
    pub time_ms: u128,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelfPlayStats {
    pub total_games: usize,
    pub p1_wins: usize,
    pub p2_wins: usize,
    pub draws: usize,
    pub aborted: usize,
    pub avg_moves: f64,
    pub avg_time_ms: f64,
    pub black: String,
    pub white: String,
    pub games: Vec<GameResult>,
}

impl SelfPlayStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_result(&mut self, result: GameResult) {
        self.total_games += 1;
        match result.winner {
            Some(PlayerId::Player1) => self.p1_wins += 1,
            Some(PlayerId::Player2) => self.p2_wins += 1,
            None if result.aborted => self.aborted += 1,
            None => self.draws += 1,
        }
        self.games.push(result);
        self.recalculate_averages();
    }

    fn recalculate_averages(&mut self) {
        if self.games.is_empty() {
            return;
        }
        let total_moves: usize = self.games.iter().map(|g| g.moves).sum();
        let total_time: u128 = self.games.iter().map(|g| g.time_ms).sum();
        self.avg_moves = total_moves as f64 / self.games.len() as f64;
        self.avg_time_ms = total_time as f64 / self.games.len() as f64;
    }
}

/// AI 同士の対局をまとめて実行する。対局ごとに独立した盤面を使うので rayon で並列に回す。
pub fn run_selfplay(config: &SelfPlayConfig) -> anyhow::Result<SelfPlayStats> {
    let black = config.black.profile();
    let white = config.white.profile();
    // 探索を始める前に設定を検証する
    black.validate()?;
    white.validate()?;

    let results: Vec<anyhow::Result<(GameResult, KifuData)>> = (1..=config.num_games)
        .into_par_iter()
        .map(|game_num| {
            let seed = match config.seed {
                Some(s) => s.wrapping_add(game_num as u64 * 2),
                None => rand::random(),
            };
            let p1 = AlphaBetaAI::with_seed(PlayerId::Player1, "AI-Black", black.clone(), seed)?;
            let p2 = AlphaBetaAI::with_seed(
                PlayerId::Player2,
                "AI-White",
                white.clone(),
                seed.wrapping_add(1),
            )?;
            let outcome = play_game(&p1, &p2)?;
            log::info!(
                "game {}/{}: {:?} after {} moves ({} ms)",
                game_num,
                config.num_games,
                outcome.0.winner,
                outcome.0.moves,
                outcome.0.time_ms
            );

            if config.save_kifus {
                outcome.1.save(&config.kifu_dir, game_num)?;
            }
            Ok(outcome)
        })
        .collect();

    let mut stats = SelfPlayStats::new();
    stats.black = black.name.clone();
    stats.white = white.name.clone();
    for result in results {
        let (game, _) = result?;
        stats.add_result(game);
    }
    Ok(stats)
}

/// 表示なしで1局打つ。盤が埋まる前に両者が続けてパスしたら打ち切る。
pub fn play_game(
    p1: &dyn PlayerController,
    p2: &dyn PlayerController,
) -> anyhow::Result<(GameResult, KifuData)> {
    let start_time = Instant::now();
    let mut game = Game::new(GameMode::PvP);
    let mut outcome = None;
    let mut passes = 0;

    for _ in 0..MAX_TURNS {
        let controller = match game.current_player {
            PlayerId::Player1 => p1,
            PlayerId::Player2 => p2,
        };
        let placed = game.board.history().len();
        outcome = game.step(controller)?;
        if outcome.is_some() {
            break;
        }

        if game.board.history().len() == placed {
            passes += 1;
            if passes >= 2 {
                log::warn!("both sides passed on a board with empty cells, aborting");
                break;
            }
        } else {
            passes = 0;
        }
    }

    let winner = match outcome {
        Some(Outcome::Win(p)) => Some(p),
        _ => None,
    };
    let result = GameResult {
        winner,
        aborted: outcome.is_none(),
        moves: game.board.history().len(),
        time_ms: start_time.elapsed().as_millis(),
    };
    let kifu = KifuData::new(p1.name(), p2.name(), &game.board, winner);
    Ok((result, kifu))
}
