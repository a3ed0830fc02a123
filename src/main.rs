use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::{execute, terminal};
use gomoku_ai::game::{Game, GameMode, KifuData};
use gomoku_ai::logic::Outcome;
use gomoku_ai::player::ai::Difficulty;
use gomoku_ai::player::{AlphaBetaAI, PlayerController, TuiController};
use gomoku_ai::selfplay::{run_selfplay, SelfPlayConfig};
use gomoku_ai::PlayerId;
use std::io;
use std::path::Path;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    // ターミナル初期化
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;

    let res = run();

    // ターミナル復帰
    execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    if let Ok(Some(summary)) = &res {
        println!("{}", summary);
    }
    res.map(|_| ())
}

fn read_key() -> anyhow::Result<KeyCode> {
    loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(key.code);
                }
            }
        }
    }
}

fn run() -> anyhow::Result<Option<String>> {
    print!("=== Gomoku ===\r\n");
    print!("\r\nSelect mode:\r\n");
    print!("1. Human vs Human\r\n");
    print!("2. Human vs AI\r\n");
    print!("3. AI self-play\r\n");
    print!("[q] Quit\r\n");

    loop {
        match read_key()? {
            KeyCode::Char('1') => return run_local(None).map(|_| None),
            KeyCode::Char('2') => {
                let difficulty = select_difficulty()?;
                return match difficulty {
                    Some(d) => run_local(Some(d)).map(|_| None),
                    None => Ok(None),
                };
            }
            KeyCode::Char('3') => return run_batch().map(Some),
            KeyCode::Char('q') => return Ok(None),
            _ => {}
        }
    }
}

fn select_difficulty() -> anyhow::Result<Option<Difficulty>> {
    print!("\r\nSelect difficulty:\r\n");
    for (i, d) in Difficulty::ALL.iter().enumerate() {
        print!("{}. {}\r\n", i + 1, d.label());
    }

    loop {
        match read_key()? {
            KeyCode::Char('1') => return Ok(Some(Difficulty::Beginner)),
            KeyCode::Char('2') => return Ok(Some(Difficulty::Advanced)),
            KeyCode::Char('3') => return Ok(Some(Difficulty::Expert)),
            KeyCode::Char('q') => return Ok(None),
            _ => {}
        }
    }
}

fn run_local(difficulty: Option<Difficulty>) -> anyhow::Result<()> {
    let p1: Box<dyn PlayerController> = Box::new(TuiController::new(PlayerId::Player1, "Player 1"));
    let (p2, mode): (Box<dyn PlayerController>, GameMode) = match difficulty {
        Some(d) => (
            Box::new(AlphaBetaAI::new(PlayerId::Player2, "AI", d.profile())?),
            GameMode::PvE {
                ai: PlayerId::Player2,
            },
        ),
        None => (
            Box::new(TuiController::new(PlayerId::Player2, "Player 2")),
            GameMode::PvP,
        ),
    };

    let mut game = Game::new(mode);
    let outcome = game.play(p1.as_ref(), p2.as_ref())?;

    print!("\r\n[s] Save kifu | any other key: Quit\r\n");
    if read_key()? == KeyCode::Char('s') {
        let winner = match outcome {
            Outcome::Win(p) => Some(p),
            Outcome::Draw => None,
        };
        let mut kifu = KifuData::new(p1.name(), p2.name(), &game.board, winner);
        if let Some(d) = difficulty {
            kifu = kifu.with_difficulty(d.label());
        }
        let path = kifu.save(Path::new("kifu"), 1)?;
        log::info!("saved kifu to {}", path.display());
    }
    Ok(())
}

fn run_batch() -> anyhow::Result<String> {
    print!("\r\nRunning self-play (L2 vs L3)...\r\n");
    let config = SelfPlayConfig {
        num_games: 10,
        black: Difficulty::Advanced,
        white: Difficulty::Expert,
        save_kifus: true,
        ..Default::default()
    };
    let stats = run_selfplay(&config)?;

    Ok(format!(
        "=== Self-Play Result ===\n{} (Black) vs {} (White)\nBlack wins: {}\nWhite wins: {}\nDraws: {}\nAborted: {}\nAvg moves: {:.1}\nAvg time: {:.1}s",
        stats.black,
        stats.white,
        stats.p1_wins,
        stats.p2_wins,
        stats.draws,
        stats.aborted,
        stats.avg_moves,
        stats.avg_time_ms / 1000.0
    ))
}
