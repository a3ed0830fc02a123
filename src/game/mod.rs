pub mod kifu;

pub use kifu::KifuData;

use crate::core::{Board, GameError, Move, PlayerId};
use crate::display::{render_board, DisplayState};
use crate::logic::{check_draw, outcome_after, Outcome};
use crate::player::{PlayerController, TurnAction};

/// 1局で使える待ったの回数
pub const REGRET_LIMIT: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// 人間同士
    PvP,
    /// 人間対 AI
    PvE { ai: PlayerId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Finished(Outcome),
}

pub struct Game {
    pub board: Board,
    pub current_player: PlayerId,
    pub mode: GameMode,
    status: GameStatus,
    regrets_left: u8,
}

impl Game {
    pub fn new(mode: GameMode) -> Self {
        Game {
            board: Board::new(),
            current_player: PlayerId::Player1,
            mode,
            status: GameStatus::Playing,
            regrets_left: REGRET_LIMIT,
        }
    }

    pub fn reset(&mut self) {
        self.board.clear();
        self.current_player = PlayerId::Player1;
        self.status = GameStatus::Playing;
        self.regrets_left = REGRET_LIMIT;
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn regrets_left(&self) -> u8 {
        self.regrets_left
    }

    pub fn is_ai_turn(&self) -> bool {
        matches!(self.mode, GameMode::PvE { ai } if ai == self.current_player)
    }

    /// 手番のプレイヤーとして着手し、勝敗を判定する
    pub fn play_move(&mut self, mv: Move) -> Result<Option<Outcome>, GameError> {
        self.ensure_mutable()?;
        self.board.place(mv, self.current_player)?;

        let outcome = outcome_after(&self.board, mv);
        match outcome {
            Some(result) => self.status = GameStatus::Finished(result),
            None => self.current_player = self.current_player.opponent(),
        }
        Ok(outcome)
    }

    /// 待った。PvP では1手、PvE では AI の手と人間の手の2手を戻す。
    pub fn regret(&mut self) -> Result<(), GameError> {
        self.ensure_mutable()?;
        if self.regrets_left == 0 {
            return Err(GameError::NoRegretsLeft);
        }

        match self.mode {
            GameMode::PvP => {
                let last = self.board.undo().ok_or(GameError::NothingToUndo)?;
                self.current_player = last.player;
            }
            GameMode::PvE { ai } => {
                if self.board.history().len() < 2 {
                    return Err(GameError::NothingToUndo);
                }
                self.board.undo();
                self.board.undo();
                self.current_player = ai.opponent();
            }
        }

        self.regrets_left -= 1;
        Ok(())
    }

    /// AI が置く場所を返せなかったとき。盤が埋まっていれば引き分け、そうでなければ手番を渡す。
    pub fn pass(&mut self) -> Result<Option<Outcome>, GameError> {
        self.ensure_mutable()?;
        if check_draw(&self.board) {
            self.status = GameStatus::Finished(Outcome::Draw);
            return Ok(Some(Outcome::Draw));
        }
        log::warn!("{} found no candidate move and passes", self.current_player);
        self.current_player = self.current_player.opponent();
        Ok(None)
    }

    pub fn resign(&mut self) -> Outcome {
        let outcome = Outcome::Win(self.current_player.opponent());
        self.status = GameStatus::Finished(outcome);
        outcome
    }

    fn ensure_mutable(&self) -> Result<(), GameError> {
        if let GameStatus::Finished(_) = self.status {
            return Err(GameError::GameOver);
        }
        Ok(())
    }

    /// 手番のコントローラに1手を選ばせて適用する。
    ///
    /// コントローラには盤面の共有参照しか渡さず、`&mut self` を握ったまま待つので、
    /// 思考中に着手や待ったが割り込むことはない。
    pub fn step(&mut self, controller: &dyn PlayerController) -> Result<Option<Outcome>, GameError> {
        if let GameStatus::Finished(outcome) = self.status {
            return Ok(Some(outcome));
        }

        match controller.choose_move(&self.board) {
            TurnAction::Place(mv) => {
                log::debug!("{} plays {}", self.current_player, mv);
                self.play_move(mv)
            }
            TurnAction::Regret => self.regret().map(|_| None),
            TurnAction::Pass => self.pass(),
            TurnAction::Resign => Ok(Some(self.resign())),
        }
    }

    /// 端末上で対局する
    pub fn play(
        &mut self,
        p1: &dyn PlayerController,
        p2: &dyn PlayerController,
    ) -> anyhow::Result<Outcome> {
        loop {
            let controller = match self.current_player {
                PlayerId::Player1 => p1,
                PlayerId::Player2 => p2,
            };

            if controller.is_ai() {
                let mut state = DisplayState::default();
                state.last_move = self.board.last_move().map(|p| p.mv);
                state.status_msg = Some(format!("{} is thinking...", controller.name()));
                render_board(&self.board, &state)?;
                std::thread::sleep(controller.response_delay());
            }

            let notice = match self.step(controller) {
                Ok(Some(outcome)) => {
                    self.show_result(outcome, p1, p2)?;
                    return Ok(outcome);
                }
                Ok(None) => None,
                Err(e) => {
                    // 盤面は変わっていないので同じ手番をやり直す
                    log::debug!("rejected action: {}", e);
                    Some(e.to_string())
                }
            };

            if let Some(msg) = notice {
                let mut state = DisplayState::default();
                state.last_move = self.board.last_move().map(|p| p.mv);
                state.status_msg = Some(msg);
                render_board(&self.board, &state)?;
                std::thread::sleep(std::time::Duration::from_millis(600));
            }
        }
    }

    fn show_result(
        &self,
        outcome: Outcome,
        p1: &dyn PlayerController,
        p2: &dyn PlayerController,
    ) -> std::io::Result<()> {
        render_board(&self.board, &self.result_state(outcome, p1, p2))
    }

    /// 終局画面。次のキー入力は呼び出し側が使うので、ここでは案内を出さない。
    fn result_state(
        &self,
        outcome: Outcome,
        p1: &dyn PlayerController,
        p2: &dyn PlayerController,
    ) -> DisplayState {
        let mut state = DisplayState::default();
        state.last_move = self.board.last_move().map(|p| p.mv);
        state.status_msg = Some(match outcome {
            Outcome::Draw => "Draw! The board is full.".to_string(),
            Outcome::Win(PlayerId::Player1) => format!("{} (Black) wins!", p1.name()),
            Outcome::Win(PlayerId::Player2) => format!("{} (White) wins!", p2.name()),
        });
        state
    }
}
