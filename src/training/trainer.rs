use log::info;

use crate::ai::{Agent, QLearningAgent};
use crate::error::TrainingError;
use crate::game::Player;
use crate::training::episode::{evaluate, fresh_board, play_game};
use crate::training::metrics::{EpisodeResult, TrainingMetrics};

/// Trainer configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub iterations: usize,
    pub log_interval: usize,
    /// Episodes between evaluations against the random baseline; 0 disables.
    pub eval_interval: usize,
    pub eval_games: usize,
    pub eval_seed: u64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            iterations: 10_000,
            log_interval: 1_000,
            eval_interval: 0,
            eval_games: 100,
            eval_seed: 0,
        }
    }
}

/// Play one self-play game on a fresh rows x cols board, `agent_a` moving
/// first, then hand the shared result to both agents and clear their
/// histories.
pub fn self_play_episode(
    rows: usize,
    cols: usize,
    agent_a: &mut QLearningAgent,
    agent_b: &mut QLearningAgent,
) -> Result<EpisodeResult, TrainingError> {
    let board = fresh_board(rows, cols)?;
    let played = play_game(board, &mut *agent_a, &mut *agent_b);
    let record = match played {
        Ok(record) => record,
        Err(e) => {
            agent_a.reset();
            agent_b.reset();
            return Err(e);
        }
    };

    for agent in [agent_a, agent_b] {
        agent.update_q_values(record.outcome);
        agent.reset();
    }

    Ok(EpisodeResult::new(record.outcome, record.moves.len()))
}

/// Run `iterations` self-play episodes between two Q-learning agents.
pub fn train(
    iterations: usize,
    rows: usize,
    cols: usize,
    agent_a: &mut QLearningAgent,
    agent_b: &mut QLearningAgent,
) -> Result<TrainingMetrics, TrainingError> {
    let mut metrics = TrainingMetrics::new();
    for _ in 0..iterations {
        let result = self_play_episode(rows, cols, agent_a, agent_b)?;
        metrics.record_episode(result);
    }
    Ok(metrics)
}

/// Self-play trainer for a pair of Q-learning agents with progress logging
/// and periodic evaluation.
pub struct Trainer {
    config: TrainerConfig,
    rows: usize,
    cols: usize,
}

impl Trainer {
    pub fn new(config: TrainerConfig, rows: usize, cols: usize) -> Self {
        Trainer { config, rows, cols }
    }

    /// Run the full training loop. `agent_a` moves first in every episode.
    pub fn train(
        &self,
        agent_a: &mut QLearningAgent,
        agent_b: &mut QLearningAgent,
    ) -> Result<TrainingMetrics, TrainingError> {
        let mut metrics = TrainingMetrics::new();
        let total = self.config.iterations;

        info!(
            "Starting Q-learning self-play for {} episodes on a {}x{} board ({} vs {})",
            total,
            self.rows,
            self.cols,
            agent_a.player().name(),
            agent_b.player().name()
        );

        for episode in 1..=total {
            let result = self_play_episode(self.rows, self.cols, agent_a, agent_b)?;
            metrics.record_episode(result);

            if self.config.log_interval > 0 && episode % self.config.log_interval == 0 {
                let window = self.config.log_interval;
                info!(
                    "Episode {}/{} | red win({}): {:.1}% | yellow win: {:.1}% | draw: {:.1}% | avg_len: {:.1} | states: {}/{}",
                    episode,
                    total,
                    window,
                    metrics.win_rate(Player::Red, window) * 100.0,
                    metrics.win_rate(Player::Yellow, window) * 100.0,
                    metrics.draw_rate(window) * 100.0,
                    metrics.average_game_length(window),
                    agent_a.table_size(),
                    agent_b.table_size(),
                );
            }

            if self.config.eval_interval > 0 && episode % self.config.eval_interval == 0 {
                for agent in [&mut *agent_a, &mut *agent_b] {
                    let win_rate = self.evaluate(agent)?;
                    info!(
                        "  >> Eval {} vs Random ({} games): {:.1}% win rate",
                        agent.player().name(),
                        self.config.eval_games,
                        win_rate * 100.0
                    );
                }
            }
        }

        info!(
            "Training complete. Total episodes: {}",
            metrics.total_episodes()
        );
        Ok(metrics)
    }

    /// Greedy win rate of `agent` against the random baseline.
    pub fn evaluate(&self, agent: &mut QLearningAgent) -> Result<f32, TrainingError> {
        evaluate(
            agent,
            self.rows,
            self.cols,
            self.config.eval_games,
            self.config.eval_seed,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::QLearningConfig;
    use crate::game::Board;

    fn pair() -> (QLearningAgent, QLearningAgent) {
        let config = QLearningConfig::default();
        (
            QLearningAgent::new(Player::Red, config.clone()),
            QLearningAgent::new(Player::Yellow, config),
        )
    }

    #[test]
    fn test_train_runs_episodes_and_clears_history() {
        let (mut a, mut b) = pair();
        let metrics = train(20, 6, 7, &mut a, &mut b).unwrap();
        assert_eq!(metrics.total_episodes(), 20);
        assert!(a.history().is_empty());
        assert!(b.history().is_empty());
        assert!(a.table_size() > 0);
        assert!(b.table_size() > 0);
    }

    #[test]
    fn test_greedy_self_play_first_episode() {
        // Fresh tables break ties toward the lowest column, so both agents
        // fill the board column by column until Red owns the bottom row.
        let (mut a, mut b) = pair();
        let result = self_play_episode(6, 7, &mut a, &mut b).unwrap();
        assert_eq!(result.winner, Some(Player::Red));
        assert_eq!(result.game_length, 19);
    }

    #[test]
    fn test_first_episode_values() {
        let (mut a, mut b) = pair();
        self_play_episode(6, 7, &mut a, &mut b).unwrap();

        // Red's winning move from the state it last saw is worth the win reward.
        let red_last = Board::from_rows(&[
            "OOO....",
            "XXX....",
            "OOO....",
            "XXX....",
            "OOO....",
            "XXX....",
        ])
        .unwrap();
        let index = QLearningAgent::index_board(&red_last);
        assert_eq!(a.q_value(&index, 3), Some(1.0));

        // Yellow lost: its last move is valued at the loss reward.
        let yellow_last = Board::from_rows(&[
            "OO.....",
            "XXX....",
            "OOO....",
            "XXX....",
            "OOO....",
            "XXX....",
        ])
        .unwrap();
        let index = QLearningAgent::index_board(&yellow_last);
        assert_eq!(b.q_value(&index, 2), Some(0.0));

        // Earlier moves bootstrap upward from q_init.
        let empty = QLearningAgent::index_board(&Board::standard());
        assert!(a.q_value(&empty, 0).unwrap() > 0.6);
        assert_eq!(a.q_value(&empty, 1), Some(0.6));
    }

    #[test]
    fn test_same_side_pair_does_not_train() {
        let config = QLearningConfig::default();
        let mut a = QLearningAgent::new(Player::Red, config.clone());
        let mut b = QLearningAgent::new(Player::Red, config);
        let err = self_play_episode(6, 7, &mut a, &mut b).unwrap_err();
        assert!(matches!(err, TrainingError::SameSide(Player::Red)));
        assert_eq!(a.table_size(), 0);
        assert_eq!(b.table_size(), 0);
    }

    #[test]
    fn test_zero_sized_board_is_an_error() {
        let (mut a, mut b) = pair();
        assert!(matches!(
            train(3, 6, 0, &mut a, &mut b),
            Err(TrainingError::InvalidBoard { rows: 6, cols: 0 })
        ));
        let trainer = Trainer::new(TrainerConfig::default(), 0, 7);
        assert!(trainer.train(&mut a, &mut b).is_err());
    }

    #[test]
    fn test_trainer_with_eval() {
        let (mut a, mut b) = pair();
        let config = TrainerConfig {
            iterations: 10,
            log_interval: 5,
            eval_interval: 5,
            eval_games: 4,
            eval_seed: 9,
        };
        let trainer = Trainer::new(config, 5, 5);
        let metrics = trainer.train(&mut a, &mut b).unwrap();
        assert_eq!(metrics.total_episodes(), 10);
        assert!(a.history().is_empty());
    }
}
