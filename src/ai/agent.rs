use crate::error::StrategyError;
use crate::game::{Board, GameOutcome, Player};

use super::external::ExternalAgent;
use super::minimax::MinimaxAgent;
use super::qlearning::QLearningAgent;
use super::random::RandomAgent;

/// Universal interface for everything that can pick a column.
pub trait Agent {
    /// Select a column to play on `board` for [`Agent::player`].
    fn choose_move(&mut self, board: &Board) -> Result<usize, StrategyError>;

    /// Called once when a game the agent took part in has ended.
    fn notify_game_end(&mut self, _outcome: GameOutcome) {}

    /// Return the agent's display name.
    fn name(&self) -> &str;

    /// The side this agent plays.
    fn player(&self) -> Player;
}

/// The closed set of strategies a driver can seat. Dispatch goes through the
/// variant, so drivers can also match on it to feed external input.
pub enum Strategy {
    Random(RandomAgent),
    Search(MinimaxAgent),
    QLearning(QLearningAgent),
    External(ExternalAgent),
}

impl Strategy {
    fn as_agent(&self) -> &dyn Agent {
        match self {
            Strategy::Random(agent) => agent,
            Strategy::Search(agent) => agent,
            Strategy::QLearning(agent) => agent,
            Strategy::External(agent) => agent,
        }
    }

    fn as_agent_mut(&mut self) -> &mut dyn Agent {
        match self {
            Strategy::Random(agent) => agent,
            Strategy::Search(agent) => agent,
            Strategy::QLearning(agent) => agent,
            Strategy::External(agent) => agent,
        }
    }

    /// True when moves come from outside the program (a human).
    pub fn is_external(&self) -> bool {
        matches!(self, Strategy::External(_))
    }
}

impl Agent for Strategy {
    fn choose_move(&mut self, board: &Board) -> Result<usize, StrategyError> {
        self.as_agent_mut().choose_move(board)
    }

    fn notify_game_end(&mut self, outcome: GameOutcome) {
        self.as_agent_mut().notify_game_end(outcome)
    }

    fn name(&self) -> &str {
        self.as_agent().name()
    }

    fn player(&self) -> Player {
        self.as_agent().player()
    }
}

impl From<RandomAgent> for Strategy {
    fn from(agent: RandomAgent) -> Self {
        Strategy::Random(agent)
    }
}

impl From<MinimaxAgent> for Strategy {
    fn from(agent: MinimaxAgent) -> Self {
        Strategy::Search(agent)
    }
}

impl From<QLearningAgent> for Strategy {
    fn from(agent: QLearningAgent) -> Self {
        Strategy::QLearning(agent)
    }
}

impl From<ExternalAgent> for Strategy {
    fn from(agent: ExternalAgent) -> Self {
        Strategy::External(agent)
    }
}
