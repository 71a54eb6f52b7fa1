use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::error::StrategyError;
use crate::game::{Board, Player};

use super::agent::Agent;

/// An agent that selects uniformly at random from valid columns.
pub struct RandomAgent {
    player: Player,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(player: Player) -> Self {
        RandomAgent {
            player,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(player: Player, seed: u64) -> Self {
        RandomAgent {
            player,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn choose_move(&mut self, board: &Board) -> Result<usize, StrategyError> {
        let actions = board.valid_locations();
        if actions.is_empty() {
            return Err(StrategyError::NoLegalMove);
        }
        let idx = self.rng.random_range(0..actions.len());
        Ok(actions[idx])
    }

    fn name(&self) -> &str {
        "Random"
    }

    fn player(&self) -> Player {
        self.player
    }
}
