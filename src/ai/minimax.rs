use std::cmp::Reverse;

use log::debug;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::error::StrategyError;
use crate::game::{Board, Player};

use super::agent::Agent;
use super::evaluator::{Heuristic, WindowHeuristic};

/// Leaf value of a position the searching side has won.
pub const WIN_VALUE: f64 = 1e14;
/// Leaf value of a position the opponent has won.
pub const LOSS_VALUE: f64 = -1e13;

/// Depth-limited minimax with alpha-beta pruning.
///
/// Leaves are always scored from the searching side's point of view, on
/// minimizing levels too. Children are ordered by the heuristic score of the
/// position after the move: best-first for the searching side, worst-first
/// for the opponent.
pub struct MinimaxAgent {
    player: Player,
    depth: usize,
    heuristic: Box<dyn Heuristic>,
    rng: StdRng,
    nodes: u64,
}

impl MinimaxAgent {
    pub fn new(player: Player, depth: usize) -> Self {
        Self::with_heuristic(player, depth, Box::new(WindowHeuristic))
    }

    pub fn with_heuristic(player: Player, depth: usize, heuristic: Box<dyn Heuristic>) -> Self {
        MinimaxAgent {
            player,
            depth,
            heuristic,
            rng: StdRng::from_os_rng(),
            nodes: 0,
        }
    }

    /// Seed the fallback column choice.
    pub fn seeded(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Nodes visited by the most recent [`MinimaxAgent::best_move`].
    pub fn last_search_nodes(&self) -> u64 {
        self.nodes
    }

    /// Search `self.depth` plies and return the chosen column.
    pub fn best_move(&mut self, board: &Board) -> Result<usize, StrategyError> {
        if board.valid_locations().is_empty() {
            return Err(StrategyError::NoLegalMove);
        }

        self.nodes = 0;
        let (col, value) =
            self.minimax(board, self.depth, f64::NEG_INFINITY, f64::INFINITY, true);
        let col = col.ok_or(StrategyError::SearchFailed)?;
        debug!(
            "{} minimax depth {} picked column {} (value {}, {} nodes)",
            self.player.name(),
            self.depth,
            col,
            value,
            self.nodes
        );
        Ok(col)
    }

    /// Returns the best column (`None` at leaves) and the position's value.
    pub fn minimax(
        &mut self,
        board: &Board,
        depth: usize,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
    ) -> (Option<usize>, f64) {
        self.nodes += 1;

        if let Some(value) = self.terminal_value(board) {
            return (None, value);
        }
        if depth == 0 {
            return (None, self.heuristic.evaluate(board, self.player) as f64);
        }

        let mover = if maximizing {
            self.player
        } else {
            self.player.other()
        };
        let children = self.ordered_children(board, mover, maximizing);

        // Fallback only; the first child always replaces it.
        let mut best_col = Some(children[self.rng.random_range(0..children.len())].0);
        let mut value = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        for (col, child) in children {
            let (_, score) = self.minimax(&child, depth - 1, alpha, beta, !maximizing);
            if maximizing {
                if score > value {
                    value = score;
                    best_col = Some(col);
                }
                alpha = alpha.max(value);
            } else {
                if score < value {
                    value = score;
                    best_col = Some(col);
                }
                beta = beta.min(value);
            }
            if alpha >= beta {
                break;
            }
        }

        (best_col, value)
    }

    fn terminal_value(&self, board: &Board) -> Option<f64> {
        if board.winning_move(self.player) {
            Some(WIN_VALUE)
        } else if board.winning_move(self.player.other()) {
            Some(LOSS_VALUE)
        } else if board.is_full() {
            Some(0.0)
        } else {
            None
        }
    }

    /// One copied board per valid column with `mover`'s piece dropped in,
    /// sorted by the mover's score of that board: descending when maximizing,
    /// ascending otherwise. Ties keep ascending column order.
    fn ordered_children(
        &self,
        board: &Board,
        mover: Player,
        maximizing: bool,
    ) -> Vec<(usize, Board)> {
        let mut scored: Vec<(usize, Board, i64)> = board
            .valid_locations()
            .into_iter()
            .filter_map(|col| {
                let child = board.with_move(col, mover)?;
                let score = self.heuristic.evaluate(&child, mover);
                Some((col, child, score))
            })
            .collect();
        if maximizing {
            scored.sort_by_key(|&(_, _, score)| Reverse(score));
        } else {
            scored.sort_by_key(|&(_, _, score)| score);
        }
        scored
            .into_iter()
            .map(|(col, child, _)| (col, child))
            .collect()
    }
}

impl Agent for MinimaxAgent {
    fn choose_move(&mut self, board: &Board) -> Result<usize, StrategyError> {
        self.best_move(board)
    }

    fn name(&self) -> &str {
        "Minimax"
    }

    fn player(&self) -> Player {
        self.player
    }
}
