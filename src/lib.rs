//! # Connect Four AI
//!
//! Connect Four on a configurable board with two computer opponents: a
//! depth-limited minimax search with alpha-beta pruning over a window-scoring
//! heuristic, and a tabular Q-learning agent trained by self-play.
//!
//! ## Modules
//!
//! - [`game`]: board, player, game state
//! - [`ai`]: agent trait, evaluator, minimax, Q-learning, random and human seats
//! - [`training`]: self-play episodes, trainer, metrics
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod training;
