pub mod ai;
pub mod controller;
pub mod tui;

pub use ai::AlphaBetaAI;
pub use controller::{PlayerController, TurnAction};
pub use tui::TuiController;
