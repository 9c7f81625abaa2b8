use serde::Serialize;

use super::board::Board;
use super::types::{GameStatus, Mark, MoveError, Player, Position, Winner};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TicTacToeGameState {
    board: Board,
    current_player: Player,
    status: GameStatus,
    last_move: Option<Position>,
}

/// Read-only view handed to clients after every operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub game_over: bool,
    pub winner: Option<Winner>,
    pub current_player: Player,
    pub last_move: Option<Position>,
}

impl Default for TicTacToeGameState {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToeGameState {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::X,
            status: GameStatus::InProgress,
            last_move: None,
        }
    }

    /// Rebuilds a state from a position, deriving the mover from mark counts
    /// and the status from the board itself.
    pub fn from_board(board: Board) -> Self {
        let current_player = if board.count(Mark::X) > board.count(Mark::O) {
            Player::O
        } else {
            Player::X
        };
        let mut state = Self {
            board,
            current_player,
            status: GameStatus::InProgress,
            last_move: None,
        };
        state.check_game_over();
        state
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    pub fn place_mark(&mut self, row: usize, col: usize) -> Result<GameStatus, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }

        let pos = Position::new(row, col);
        match self.board.get(pos) {
            None => return Err(MoveError::OutOfBounds { row, col }),
            Some(Mark::Empty) => {}
            Some(_) => return Err(MoveError::CellOccupied(pos)),
        }

        self.board.set(pos, self.current_player.mark());
        self.last_move = Some(pos);

        self.check_game_over();

        if self.status == GameStatus::InProgress {
            self.current_player = self.current_player.opponent();
        }

        Ok(self.status)
    }

    fn check_game_over(&mut self) {
        if let Some(winner) = self.board.winner() {
            self.status = GameStatus::Won(winner);
        } else if self.board.is_full() {
            self.status = GameStatus::Draw;
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board,
            game_over: self.status.is_over(),
            winner: Winner::from_status(self.status),
            current_player: self.current_player,
            last_move: self.last_move,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::board::LINES;

    const E: Mark = Mark::Empty;
    const X: Mark = Mark::X;
    const O: Mark = Mark::O;

    fn play(state: &mut TicTacToeGameState, moves: &[(usize, usize)]) {
        for &(row, col) in moves {
            state.place_mark(row, col).unwrap();
        }
    }

    fn line_owners(board: &Board) -> Vec<Player> {
        let mut owners = Vec::new();
        for line in LINES {
            let [a, b, c] = line.map(|(row, col)| board.get(Position::new(row, col)));
            if a == b && b == c {
                if let Some(player) = a.and_then(|mark| mark.player()) {
                    if !owners.contains(&player) {
                        owners.push(player);
                    }
                }
            }
        }
        owners
    }

    fn assert_terminal_consistent(state: &TicTacToeGameState) {
        let owners = line_owners(state.board());
        assert!(owners.len() <= 1, "lines for both players: {:?}", state);

        match state.status() {
            GameStatus::Won(player) => {
                assert_eq!(owners, vec![player]);
                assert_eq!(state.board().winner(), Some(player));
            }
            GameStatus::Draw => {
                assert_eq!(state.board().winner(), None);
                assert!(state.board().is_full());
            }
            GameStatus::InProgress => {
                assert!(owners.is_empty());
                assert!(!state.board().is_full());
            }
        }
    }

    /// Returns the number of positions visited below `state`.
    fn walk_all_games(state: &TicTacToeGameState) -> usize {
        assert_terminal_consistent(state);
        if state.status().is_over() {
            return 1;
        }

        let moves: Vec<Position> = state.board().empty_cells().collect();
        let mut visited = 1;
        for pos in moves {
            let mut next = state.clone();
            next.place_mark(pos.row, pos.col).unwrap();
            visited += walk_all_games(&next);
        }
        visited
    }

    #[test]
    fn test_every_reachable_position_has_single_outcome() {
        let visited = walk_all_games(&TicTacToeGameState::new());

        assert_eq!(visited, 549_946);
    }

    #[test]
    fn test_new_game_initial_state() {
        let state = TicTacToeGameState::new();

        assert_eq!(*state.board(), Board::new());
        assert_eq!(state.current_player(), Player::X);
        assert_eq!(state.status(), GameStatus::InProgress);
        assert_eq!(state.last_move(), None);
    }

    #[test]
    fn test_place_mark_switches_turn() {
        let mut state = TicTacToeGameState::new();

        let status = state.place_mark(1, 1).unwrap();

        assert_eq!(status, GameStatus::InProgress);
        assert_eq!(state.board().get(Position::new(1, 1)), Some(Mark::X));
        assert_eq!(state.current_player(), Player::O);
        assert_eq!(state.last_move(), Some(Position::new(1, 1)));
    }

    #[test]
    fn test_winning_move_keeps_mover() {
        let board = Board::from_rows([[X, X, E], [O, O, E], [E, E, E]]);
        let mut state = TicTacToeGameState::from_board(board);
        assert_eq!(state.current_player(), Player::X);

        let status = state.place_mark(0, 2).unwrap();

        assert_eq!(status, GameStatus::Won(Player::X));
        assert_eq!(state.status(), GameStatus::Won(Player::X));
        assert_eq!(state.current_player(), Player::X);
    }

    #[test]
    fn test_filling_board_without_line_is_draw() {
        let mut state = TicTacToeGameState::new();

        play(
            &mut state,
            &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0), (2, 2)],
        );

        assert_eq!(state.status(), GameStatus::Draw);
        assert_eq!(state.current_player(), Player::X);
    }

    #[test]
    fn test_full_board_with_line_is_win_not_draw() {
        let winning = Board::from_rows([[X, O, X], [O, X, O], [O, X, X]]);
        let won = TicTacToeGameState::from_board(winning);
        assert!(won.board().is_full());
        assert_eq!(won.status(), GameStatus::Won(Player::X));
    }

    #[test]
    fn test_rejections_leave_state_unchanged() {
        let mut state = TicTacToeGameState::new();
        play(&mut state, &[(0, 0), (1, 1)]);
        let before = state.clone();

        assert_eq!(
            state.place_mark(0, 0),
            Err(MoveError::CellOccupied(Position::new(0, 0)))
        );
        assert_eq!(state, before);

        assert_eq!(
            state.place_mark(3, 1),
            Err(MoveError::OutOfBounds { row: 3, col: 1 })
        );
        assert_eq!(
            state.place_mark(0, usize::MAX),
            Err(MoveError::OutOfBounds { row: 0, col: usize::MAX })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_moves_after_game_over_rejected() {
        let mut state = TicTacToeGameState::new();
        play(&mut state, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        assert_eq!(state.status(), GameStatus::Won(Player::X));
        let before = state.clone();

        assert_eq!(state.place_mark(2, 2), Err(MoveError::GameOver));
        assert_eq!(state.place_mark(0, 0), Err(MoveError::GameOver));
        assert_eq!(state, before);
    }

    #[test]
    fn test_reset_after_finished_game() {
        let mut state = TicTacToeGameState::new();
        play(&mut state, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);

        state.reset();

        assert_eq!(state, TicTacToeGameState::new());
        assert!(state.place_mark(0, 0).is_ok());
    }

    #[test]
    fn test_snapshot_is_idempotent() {
        let mut state = TicTacToeGameState::new();
        play(&mut state, &[(2, 2)]);

        let first = state.snapshot();
        let second = state.snapshot();

        assert_eq!(first, second);
        assert_eq!(first.current_player, Player::O);
        assert_eq!(first.winner, None);
        assert!(!first.game_over);
    }

    #[test]
    fn test_snapshot_wire_format() {
        let mut state = TicTacToeGameState::new();
        play(&mut state, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);

        let json = serde_json::to_value(state.snapshot()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "board": [[1, 1, 1], [-1, -1, 0], [0, 0, 0]],
                "game_over": true,
                "winner": 1,
                "current_player": 1,
                "last_move": {"row": 0, "col": 2},
            })
        );
    }

    #[test]
    fn test_snapshot_draw_winner_is_zero() {
        let board = Board::from_rows([[X, O, X], [X, O, O], [O, X, X]]);
        let state = TicTacToeGameState::from_board(board);

        let json = serde_json::to_value(state.snapshot()).unwrap();

        assert_eq!(json["winner"], serde_json::json!(0));
        assert_eq!(json["game_over"], serde_json::json!(true));
    }

    #[test]
    fn test_from_board_derives_mover() {
        let board = Board::from_rows([[X, E, E], [E, E, E], [E, E, E]]);

        let state = TicTacToeGameState::from_board(board);

        assert_eq!(state.current_player(), Player::O);
        assert_eq!(state.status(), GameStatus::InProgress);
    }
}
