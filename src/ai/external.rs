use crate::error::StrategyError;
use crate::game::{Board, Player};

use super::agent::Agent;

/// A seat whose moves come from outside the program. The driver submits a
/// column (e.g. read from a terminal) before asking for the move.
pub struct ExternalAgent {
    player: Player,
    pending: Option<usize>,
}

impl ExternalAgent {
    pub fn new(player: Player) -> Self {
        ExternalAgent {
            player,
            pending: None,
        }
    }

    /// Queue the next column; replaces any column not yet consumed.
    pub fn submit(&mut self, col: usize) {
        self.pending = Some(col);
    }
}

impl Agent for ExternalAgent {
    fn choose_move(&mut self, board: &Board) -> Result<usize, StrategyError> {
        let col = self.pending.take().ok_or(StrategyError::AwaitingInput)?;
        if !board.is_valid_location(col) {
            return Err(StrategyError::InvalidColumn {
                col,
                cols: board.cols(),
            });
        }
        Ok(col)
    }

    fn name(&self) -> &str {
        "Human"
    }

    fn player(&self) -> Player {
        self.player
    }
}
