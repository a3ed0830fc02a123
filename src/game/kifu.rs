use crate::core::{Board, GameError, Placement, PlayerId};
use crate::logic::{outcome_after, Outcome};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// 棋譜
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KifuData {
    pub player1_name: String,
    pub player2_name: String,
    pub difficulty: Option<String>,
    pub moves: Vec<Placement>,
    /// None は引き分けまたは未決着
    pub winner: Option<PlayerId>,
    pub recorded_at: String,
}

impl KifuData {
    pub fn new(player1_name: &str, player2_name: &str, board: &Board, winner: Option<PlayerId>) -> Self {
        KifuData {
            player1_name: player1_name.to_string(),
            player2_name: player2_name.to_string(),
            difficulty: None,
            moves: board.history().to_vec(),
            winner,
            recorded_at: chrono::Local::now().to_rfc3339(),
        }
    }

    pub fn with_difficulty(mut self, label: &str) -> Self {
        self.difficulty = Some(label.to_string());
        self
    }

    /// 棋譜を並べ直して最終局面を得る。途中で決着した後の手があればエラー。
    pub fn replay(&self) -> Result<(Board, Option<Outcome>), GameError> {
        let mut board = Board::new();
        let mut outcome = None;
        for placement in &self.moves {
            if outcome.is_some() {
                return Err(GameError::GameOver);
            }
            board.place(placement.mv, placement.player)?;
            outcome = outcome_after(&board, placement.mv);
        }
        Ok((board, outcome))
    }

    pub fn save(&self, dir: &Path, game_num: usize) -> anyhow::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let filename = dir.join(format!(
            "game_{:04}_{}.json",
            game_num,
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        ));
        let file = File::create(&filename)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(filename)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
