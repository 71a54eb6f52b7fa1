//! Move-selection strategies: heuristic minimax search, tabular Q-learning,
//! a random baseline and externally supplied moves, all behind [`Agent`].

mod agent;
pub mod evaluator;
mod external;
pub mod minimax;
pub mod qlearning;
mod random;

pub use agent::{Agent, Strategy};
pub use evaluator::{Heuristic, WindowHeuristic};
pub use external::ExternalAgent;
pub use minimax::MinimaxAgent;
pub use qlearning::{QLearningAgent, QLearningConfig};
pub use random::RandomAgent;
