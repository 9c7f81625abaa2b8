use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::game_state::TicTacToeGameState;
use super::types::{CELL_COUNT, Mark, Player, Position};

pub const WIN_SCORE: i32 = 10;

/// How terminal wins are valued during search.
///
/// `Flat` gives every win the same value no matter how deep it is found,
/// so the bot may delay a certain win. `DepthAdjusted` subtracts the depth,
/// preferring faster wins and slower losses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    #[default]
    Flat,
    DepthAdjusted,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub scoring: ScoringMode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub position: Position,
    pub score: i32,
    pub nodes: u64,
}

/// A hypothetical mark that is cleared again when dropped, including on
/// early returns out of a pruned branch.
struct Placement<'a> {
    board: &'a mut Board,
    pos: Position,
}

impl<'a> Placement<'a> {
    fn new(board: &'a mut Board, pos: Position, mark: Mark) -> Self {
        board.set(pos, mark);
        Self { board, pos }
    }
}

impl Deref for Placement<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Placement<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Placement<'_> {
    fn drop(&mut self) {
        self.board.set(self.pos, Mark::Empty);
    }
}

fn all_positions() -> impl Iterator<Item = Position> {
    (0..CELL_COUNT).map(Position::from_index)
}

struct Searcher {
    bot: Player,
    scoring: ScoringMode,
    nodes: u64,
}

impl Searcher {
    fn new(bot: Player, scoring: ScoringMode) -> Self {
        Self {
            bot,
            scoring,
            nodes: 0,
        }
    }

    fn terminal_score(&self, board: &Board, depth: i32) -> Option<i32> {
        if let Some(winner) = board.winner() {
            let score = match self.scoring {
                ScoringMode::Flat => WIN_SCORE,
                ScoringMode::DepthAdjusted => WIN_SCORE - depth,
            };
            return Some(if winner == self.bot { score } else { -score });
        }

        if board.is_full() {
            return Some(0);
        }

        None
    }

    fn minimax(
        &mut self,
        board: &mut Board,
        depth: i32,
        is_maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;

        if let Some(score) = self.terminal_score(board, depth) {
            return score;
        }

        if is_maximizing {
            let mark = self.bot.mark();
            let mut max_eval = i32::MIN;
            for pos in all_positions() {
                if !board.is_empty_at(pos) {
                    continue;
                }
                let mut placed = Placement::new(board, pos, mark);
                let eval = self.minimax(&mut placed, depth + 1, false, alpha, beta);

                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    break;
                }
            }
            max_eval
        } else {
            let mark = self.bot.opponent().mark();
            let mut min_eval = i32::MAX;
            for pos in all_positions() {
                if !board.is_empty_at(pos) {
                    continue;
                }
                let mut placed = Placement::new(board, pos, mark);
                let eval = self.minimax(&mut placed, depth + 1, true, alpha, beta);

                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    break;
                }
            }
            min_eval
        }
    }
}

/// Full-depth alpha-beta search for the player to move.
///
/// Returns `None` when the game is already decided or no cell is free. The
/// state itself is never touched; candidates are tried on a copy of the
/// board. Each root candidate is searched with a fresh window so its score
/// is exact, and the earliest cell in row-major order wins ties.
pub fn search_best_move(
    state: &TicTacToeGameState,
    settings: &SearchSettings,
) -> Option<SearchOutcome> {
    if state.status().is_over() || state.board().is_full() {
        return None;
    }

    let bot = state.current_player();
    let mut board = *state.board();
    let mut searcher = Searcher::new(bot, settings.scoring);
    let mut best: Option<(Position, i32)> = None;

    for pos in all_positions() {
        if !board.is_empty_at(pos) {
            continue;
        }

        let mut placed = Placement::new(&mut board, pos, bot.mark());
        let score = searcher.minimax(&mut placed, 0, false, i32::MIN, i32::MAX);
        drop(placed);

        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((pos, score));
        }
    }

    best.map(|(position, score)| SearchOutcome {
        position,
        score,
        nodes: searcher.nodes,
    })
}

pub fn calculate_minimax_move(
    state: &TicTacToeGameState,
    settings: &SearchSettings,
) -> Option<Position> {
    search_best_move(state, settings).map(|outcome| outcome.position)
}
