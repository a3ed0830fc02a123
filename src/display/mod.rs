use crate::core::{Board, Move, PlayerId, BOARD_SIZE};
use crossterm::{cursor, execute, style::Stylize, terminal};
use std::io::{stdout, Write};

pub struct DisplayState {
    pub cursor: Move,
    pub last_move: Option<Move>,
    pub status_msg: Option<String>,
    pub footer: Option<String>,
    pub show_cursor: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            cursor: Move::center(),
            last_move: None,
            status_msg: None,
            footer: None,
            show_cursor: false,
        }
    }
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn render_board(board: &Board, state: &DisplayState) -> std::io::Result<()> {
    let mut out = stdout();

    // 画面クリア（スクロール防止）
    execute!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;

    write!(out, "=== Gomoku ===\r\n")?;
    match &state.status_msg {
        Some(msg) => write!(out, "{}\r\n\r\n", msg.clone().bold().yellow())?,
        None => write!(out, "\r\n\r\n")?,
    }

    write!(out, "   ")?;
    for x in 0..BOARD_SIZE {
        write!(out, "{:>3}", x)?;
    }
    write!(out, "\r\n")?;

    for y in 0..BOARD_SIZE {
        write!(out, "{:>2} ", y)?;
        for x in 0..BOARD_SIZE {
            let pos = Move::new(x, y);
            let is_cursor = state.show_cursor && state.cursor == pos;
            let is_last = state.last_move == Some(pos);

            let glyph = match board.at(pos) {
                Some(p) => p.stone_char(),
                None => '+',
            };
            let (prefix, suffix) = if is_cursor {
                ('[', ']')
            } else if is_last {
                ('{', '}')
            } else {
                (' ', ' ')
            };
            let cell = format!("{}{}{}", prefix, glyph, suffix);

            if is_cursor {
                write!(out, "{}", cell.yellow())?;
            } else if is_last {
                write!(out, "{}", cell.red())?;
            } else {
                match board.at(pos) {
                    Some(PlayerId::Player1) => write!(out, "{}", cell.cyan())?,
                    Some(PlayerId::Player2) => write!(out, "{}", cell.magenta())?,
                    None => write!(out, "{}", cell.dark_grey())?,
                }
            }
        }
        write!(out, "\r\n")?;
    }

    if let Some(footer) = &state.footer {
        write!(out, "\r\n{}\r\n", footer)?;
    }
    out.flush()
}
