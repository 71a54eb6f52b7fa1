//! Training infrastructure: game playing between agents, Q-learning
//! self-play, evaluation against the random baseline, and rolling metrics.

pub mod episode;
pub mod metrics;
pub mod trainer;

pub use episode::{evaluate, play_game, GameRecord};
pub use metrics::{EpisodeResult, TrainingMetrics};
pub use trainer::{self_play_episode, train, Trainer, TrainerConfig};
