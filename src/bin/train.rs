use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use connect_four_ai::ai::{Agent, QLearningAgent};
use connect_four_ai::config::AppConfig;
use connect_four_ai::game::Player;
use connect_four_ai::training::Trainer;

/// Train a pair of Q-learning agents via self-play.
#[derive(Parser)]
#[command(name = "train", about = "Train Connect Four Q-learning agents")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override number of training episodes
    #[arg(long)]
    episodes: Option<usize>,

    /// Override learning rate
    #[arg(long)]
    lr: Option<f64>,

    /// Print a default config file and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    // Load configuration
    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(episodes) = cli.episodes {
        app_config.training.iterations = episodes;
    }
    if let Some(lr) = cli.lr {
        app_config.qlearning.learning_rate = lr;
    }
    app_config.validate().context("invalid settings")?;

    let mut red = QLearningAgent::new(Player::Red, app_config.qlearning.clone());
    let mut yellow = QLearningAgent::new(Player::Yellow, app_config.qlearning.clone());

    let trainer = Trainer::new(
        app_config.training.clone(),
        app_config.board.rows,
        app_config.board.cols,
    );
    let metrics = trainer
        .train(&mut red, &mut yellow)
        .context("self-play training")?;

    let total = metrics.total_episodes();
    println!("Episodes: {total}");
    for player in [Player::Red, Player::Yellow] {
        let wins = metrics.total_wins(player);
        println!(
            "{} wins: {} ({:.1}%)",
            player.name(),
            wins,
            wins as f64 / total as f64 * 100.0
        );
    }
    println!(
        "Draws: {} ({:.1}%)",
        metrics.total_draws(),
        metrics.total_draws() as f64 / total as f64 * 100.0
    );
    println!("States: red {} / yellow {}", red.table_size(), yellow.table_size());

    for agent in [&mut red, &mut yellow] {
        let win_rate = trainer.evaluate(agent).context("evaluation")?;
        println!(
            "{} vs Random ({} games): {:.1}% win rate",
            agent.player().name(),
            app_config.training.eval_games,
            win_rate * 100.0
        );
    }

    Ok(())
}
