use crate::core::{Board, Move, PlayerId, BOARD_SIZE};
use crate::display::{render_board, DisplayState};
use crate::player::{PlayerController, TurnAction};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use std::time::Duration;

pub struct TuiController {
    player_id: PlayerId,
    name: String,
}

impl TuiController {
    pub fn new(player_id: PlayerId, name: &str) -> Self {
        Self {
            player_id,
            name: name.to_string(),
        }
    }

    fn read_action(&self, board: &Board, state: &mut DisplayState) -> std::io::Result<TurnAction> {
        loop {
            render_board(board, state)?;

            if !event::poll(Duration::from_millis(100))? {
                continue;
            }
            let code = match event::read()? {
                Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press,
                    ..
                }) => code,
                _ => continue,
            };

            match code {
                KeyCode::Char('q') => return Ok(TurnAction::Resign),
                KeyCode::Char('u') => return Ok(TurnAction::Regret),
                KeyCode::Up if state.cursor.y > 0 => state.cursor.y -= 1,
                KeyCode::Down if state.cursor.y < BOARD_SIZE - 1 => state.cursor.y += 1,
                KeyCode::Left if state.cursor.x > 0 => state.cursor.x -= 1,
                KeyCode::Right if state.cursor.x < BOARD_SIZE - 1 => state.cursor.x += 1,
                KeyCode::Enter | KeyCode::Char(' ') => {
                    // 埋まっているマスは無視する
                    if board.is_empty_at(state.cursor) {
                        return Ok(TurnAction::Place(state.cursor));
                    }
                    state.status_msg = Some(format!("{} is occupied", state.cursor));
                }
                _ => {}
            }
        }
    }
}

impl PlayerController for TuiController {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&self, board: &Board) -> TurnAction {
        let mut state = DisplayState::default();
        state.show_cursor = true;
        state.last_move = board.last_move().map(|p| p.mv);
        state.cursor = state.last_move.unwrap_or_else(Move::center);
        state.status_msg = Some(format!(
            "{}'s turn ({} {})",
            self.name,
            self.player_id.stone_char(),
            self.player_id
        ));
        state.footer =
            Some("[Arrows]: Move | [Enter]: Place | [u]: Regret | [q]: Resign".to_string());

        match self.read_action(board, &mut state) {
            Ok(action) => action,
            Err(e) => {
                log::error!("terminal input failed: {}", e);
                TurnAction::Resign
            }
        }
    }

    fn is_ai(&self) -> bool {
        false
    }
}
