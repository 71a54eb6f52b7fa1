//! Window-based static evaluation used for search leaves and move ordering.

use crate::game::{Board, Cell, Player, CONNECT};

const WIN_SCORE: i64 = 100;
const THREE_SCORE: i64 = 5;
const TWO_SCORE: i64 = 2;
const OPPONENT_THREE_PENALTY: i64 = 4;
const CENTER_BONUS: i64 = 6;

/// Trait for evaluating a board position from a player's perspective.
pub trait Heuristic: Send {
    fn evaluate(&self, board: &Board, player: Player) -> i64;
}

/// Default heuristic: center-column bonus plus the sum of all window scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowHeuristic;

impl Heuristic for WindowHeuristic {
    fn evaluate(&self, board: &Board, player: Player) -> i64 {
        score_position(board, player)
    }
}

/// Score one window for `player`. Only the piece counts matter, never their
/// order within the window.
pub fn evaluate_window(window: &[Cell; CONNECT], player: Player) -> i64 {
    let own_cell = player.to_cell();
    let opp_cell = player.other().to_cell();
    let own = window.iter().filter(|&&c| c == own_cell).count();
    let opp = window.iter().filter(|&&c| c == opp_cell).count();
    let empty = window.iter().filter(|&&c| c == Cell::Empty).count();

    let mut score = if own == 4 {
        WIN_SCORE
    } else if own == 3 && empty == 1 {
        THREE_SCORE
    } else if own == 2 && empty == 2 {
        TWO_SCORE
    } else {
        0
    };

    if opp == 3 && empty == 1 {
        score -= OPPONENT_THREE_PENALTY;
    }

    score
}

/// Static score of `board` for `player`.
pub fn score_position(board: &Board, player: Player) -> i64 {
    let own_cell = player.to_cell();
    let center = board.cols() / 2;
    let center_count = (0..board.rows())
        .filter(|&row| board.get(row, center) == own_cell)
        .count() as i64;

    let windows: i64 = board
        .windows()
        .map(|window| evaluate_window(&window, player))
        .sum();

    center_count * CENTER_BONUS + windows
}

/// Score of the position reached by dropping `player`'s piece into `col`.
/// A full column yields `None`.
pub fn heuristic(board: &Board, col: usize, player: Player) -> Option<i64> {
    board
        .with_move(col, player)
        .map(|next| score_position(&next, player))
}
