mod board;
mod bot_controller;
mod game_state;
mod types;

pub use board::{Board, LINES};
pub use bot_controller::{
    SearchOutcome, ScoringMode, SearchSettings, WIN_SCORE, calculate_minimax_move,
    search_best_move,
};
pub use game_state::{GameSnapshot, TicTacToeGameState};
pub use types::{BOARD_SIZE, CELL_COUNT, GameStatus, Mark, MoveError, Player, Position, Winner};
