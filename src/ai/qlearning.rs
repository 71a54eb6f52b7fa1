use std::collections::HashMap;

use log::debug;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::error::StrategyError;
use crate::game::{Board, GameOutcome, Player};

use super::agent::Agent;

const WIN_REWARD: f64 = 1.0;
const LOSS_REWARD: f64 = 0.0;
const DRAW_REWARD: f64 = 0.5;

/// Q-learning hyperparameters.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct QLearningConfig {
    pub learning_rate: f64,
    pub discount: f64,
    pub q_init: f64,
    /// Probability of a random valid column instead of the greedy one.
    pub epsilon: f64,
    pub seed: Option<u64>,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        QLearningConfig {
            learning_rate: 0.9,
            discount: 0.95,
            q_init: 0.6,
            epsilon: 0.0,
            seed: None,
        }
    }
}

/// Tabular Q-learning agent. Values are keyed by the full board contents and
/// updated once per game by walking the game's moves backwards.
///
/// Keys carry no dimensions, so an agent binds to the column count of the
/// first board it sees and refuses boards of any other width.
pub struct QLearningAgent {
    player: Player,
    config: QLearningConfig,
    q_table: HashMap<String, Vec<f64>>,
    history: Vec<(String, usize)>,
    rng: StdRng,
    width: Option<usize>,
    learning: bool,
}

impl QLearningAgent {
    pub fn new(player: Player, config: QLearningConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        QLearningAgent {
            player,
            config,
            q_table: HashMap::new(),
            history: Vec::new(),
            rng,
            width: None,
            learning: true,
        }
    }

    /// Row-major digits of the cell codes: one character per cell.
    pub fn index_board(board: &Board) -> String {
        board
            .cells()
            .iter()
            .map(|cell| char::from(b'0' + cell.code()))
            .collect()
    }

    /// Values for `board_index`, created at `q_init` on first sight.
    pub fn get_q_values(&mut self, board_index: &str, cols: usize) -> &[f64] {
        let q_init = self.config.q_init;
        self.q_table
            .entry(board_index.to_string())
            .or_insert_with(|| vec![q_init; cols])
    }

    /// Stored value without creating an entry.
    pub fn q_value(&self, board_index: &str, action: usize) -> Option<f64> {
        self.q_table
            .get(board_index)
            .and_then(|values| values.get(action).copied())
    }

    /// Greedy column among the valid ones; ties go to the lowest column.
    /// The choice is appended to the episode history.
    pub fn find_best_move(&mut self, board: &Board) -> Result<usize, StrategyError> {
        self.bind_width(board)?;
        let valid = board.valid_locations();
        let (&first, rest) = valid.split_first().ok_or(StrategyError::NoLegalMove)?;

        let index = Self::index_board(board);
        let q_values = self.get_q_values(&index, board.cols());
        let mut best = first;
        for &col in rest {
            if q_values[col] > q_values[best] {
                best = col;
            }
        }

        self.history.push((index, best));
        Ok(best)
    }

    /// Greedy column from stored values, `q_init` for unseen states. Neither
    /// the table nor the history changes.
    pub fn peek_best_move(&self, board: &Board) -> Result<usize, StrategyError> {
        self.check_width(board)?;
        let valid = board.valid_locations();
        let (&first, rest) = valid.split_first().ok_or(StrategyError::NoLegalMove)?;

        let index = Self::index_board(board);
        let value = |col| self.q_value(&index, col).unwrap_or(self.config.q_init);
        let mut best = first;
        let mut best_value = value(first);
        for &col in rest {
            let v = value(col);
            if v > best_value {
                best = col;
                best_value = v;
            }
        }
        Ok(best)
    }

    fn check_width(&self, board: &Board) -> Result<(), StrategyError> {
        match self.width {
            Some(expected) if expected != board.cols() => Err(StrategyError::BoardWidthMismatch {
                expected,
                found: board.cols(),
            }),
            _ => Ok(()),
        }
    }

    fn bind_width(&mut self, board: &Board) -> Result<(), StrategyError> {
        self.check_width(board)?;
        self.width = Some(board.cols());
        Ok(())
    }

    fn explore(&mut self, board: &Board) -> Result<usize, StrategyError> {
        self.bind_width(board)?;
        let valid = board.valid_locations();
        if valid.is_empty() {
            return Err(StrategyError::NoLegalMove);
        }
        let col = valid[self.rng.random_range(0..valid.len())];
        let index = Self::index_board(board);
        self.get_q_values(&index, board.cols());
        self.history.push((index, col));
        Ok(col)
    }

    /// Propagate the game result back through this game's moves, newest first.
    /// The newest move takes the terminal reward outright; every earlier move
    /// bootstraps from the best value of the state visited after it.
    pub fn update_q_values(&mut self, outcome: GameOutcome) {
        let reward = self.reward(outcome);
        let alpha = self.config.learning_rate;
        let gamma = self.config.discount;

        let mut next_max: Option<f64> = None;
        for (index, action) in self.history.iter().rev() {
            let Some(values) = self.q_table.get_mut(index) else {
                continue;
            };
            values[*action] = match next_max {
                None => reward,
                Some(next) => (1.0 - alpha) * values[*action] + alpha * (reward + gamma * next),
            };
            next_max = Some(values.iter().copied().fold(f64::NEG_INFINITY, f64::max));
        }

        debug!(
            "{} q-update: reward {} over {} moves, table size {}",
            self.player.name(),
            reward,
            self.history.len(),
            self.q_table.len()
        );
    }

    /// Forget the current game's moves.
    pub fn reset(&mut self) {
        self.history.clear();
    }

    fn reward(&self, outcome: GameOutcome) -> f64 {
        match outcome {
            GameOutcome::Winner(winner) if winner == self.player => WIN_REWARD,
            GameOutcome::Winner(_) => LOSS_REWARD,
            GameOutcome::Draw => DRAW_REWARD,
        }
    }

    pub fn history(&self) -> &[(String, usize)] {
        &self.history
    }

    /// Number of distinct board states in the table.
    pub fn table_size(&self) -> usize {
        self.q_table.len()
    }

    pub fn epsilon(&self) -> f64 {
        self.config.epsilon
    }

    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.config.epsilon = epsilon;
    }

    /// Column count this agent's table is bound to, once it has played.
    pub fn width(&self) -> Option<usize> {
        self.width
    }

    pub fn is_learning(&self) -> bool {
        self.learning
    }

    /// With learning off, moves are greedy lookups that leave the table and
    /// the history untouched, and game results are ignored.
    pub fn set_learning(&mut self, learning: bool) {
        self.learning = learning;
    }

    pub fn config(&self) -> &QLearningConfig {
        &self.config
    }
}

impl Agent for QLearningAgent {
    fn choose_move(&mut self, board: &Board) -> Result<usize, StrategyError> {
        if !self.learning {
            self.bind_width(board)?;
            return self.peek_best_move(board);
        }
        if self.config.epsilon > 0.0 && self.rng.random_range(0.0..1.0) < self.config.epsilon {
            return self.explore(board);
        }
        self.find_best_move(board)
    }

    fn notify_game_end(&mut self, outcome: GameOutcome) {
        if self.learning {
            self.update_q_values(outcome);
        }
        self.reset();
    }

    fn name(&self) -> &str {
        "Q-Learning"
    }

    fn player(&self) -> Player {
        self.player
    }
}
