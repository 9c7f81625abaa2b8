use std::sync::Arc;
use tokio::sync::Mutex;

use common::games::tictactoe::{
    GameSnapshot, GameStatus, MoveError, SearchSettings, TicTacToeGameState, search_best_move,
};
use common::{debug, log};

/// Owns the single live game. Each call holds the lock until it is done,
/// so a human move and the bot's reply are applied before the next request.
#[derive(Clone)]
pub struct GameService {
    game_state: Arc<Mutex<TicTacToeGameState>>,
    search_settings: SearchSettings,
}

impl GameService {
    pub fn new(search_settings: SearchSettings) -> Self {
        Self {
            game_state: Arc::new(Mutex::new(TicTacToeGameState::new())),
            search_settings,
        }
    }

    pub async fn reset(&self) {
        let mut state = self.game_state.lock().await;
        state.reset();
        log!("Game reset");
    }

    pub async fn play_move(&self, row: usize, col: usize) -> Result<GameSnapshot, MoveError> {
        let mut state = self.game_state.lock().await;
        let player = state.current_player();

        let status = state.place_mark(row, col).inspect_err(|e| {
            log!("Rejected move ({}, {}) for {}: {}", row, col, player, e);
        })?;
        log!("{} played ({}, {}), status {:?}", player, row, col, status);

        if status == GameStatus::InProgress {
            self.play_bot_reply(&mut state)?;
        }

        Ok(state.snapshot())
    }

    fn play_bot_reply(&self, state: &mut TicTacToeGameState) -> Result<(), MoveError> {
        let bot = state.current_player();
        let Some(outcome) = search_best_move(state, &self.search_settings) else {
            log!("Bot {} has no move available", bot);
            return Ok(());
        };

        debug!(
            "Bot {} search: score {}, {} nodes",
            bot, outcome.score, outcome.nodes
        );
        let status = state.place_mark(outcome.position.row, outcome.position.col)?;
        log!("Bot {} played {}, status {:?}", bot, outcome.position, status);
        Ok(())
    }

    pub async fn state(&self) -> GameSnapshot {
        self.game_state.lock().await.snapshot()
    }
}
