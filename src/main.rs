use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use rand::Rng;

use connect_four_ai::ai::{
    Agent, ExternalAgent, MinimaxAgent, QLearningAgent, RandomAgent, Strategy,
};
use connect_four_ai::config::AppConfig;
use connect_four_ai::error::StrategyError;
use connect_four_ai::game::{Board, GameOutcome, GameState, Player};
use connect_four_ai::training::train;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SeatKind {
    Human,
    Minimax,
    Random,
    Qlearning,
}

/// Play Connect Four in the terminal against minimax, Q-learning or random opponents.
#[derive(Parser)]
#[command(name = "connect_four_ai", about = "Play Connect Four against an AI")]
struct Cli {
    /// Who plays Red
    #[arg(long, value_enum, default_value = "human")]
    red: SeatKind,

    /// Who plays Yellow
    #[arg(long, value_enum, default_value = "minimax")]
    yellow: SeatKind,

    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override minimax search depth
    #[arg(long)]
    depth: Option<usize>,

    /// Override board rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override board columns
    #[arg(long)]
    cols: Option<usize>,

    /// Self-play episodes to train Q-learning seats before the game
    #[arg(long, default_value_t = 0)]
    q_train: usize,

    /// Pick the first player at random instead of Red
    #[arg(long)]
    random_first: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(depth) = cli.depth {
        config.search.depth = depth;
    }
    if let Some(rows) = cli.rows {
        config.board.rows = rows;
    }
    if let Some(cols) = cli.cols {
        config.board.cols = cols;
    }
    config.validate().context("invalid settings")?;

    let mut q_agents = if cli.red == SeatKind::Qlearning || cli.yellow == SeatKind::Qlearning {
        Some(trained_q_agents(&config, cli.q_train)?)
    } else {
        None
    };

    let mut red = build_seat(cli.red, Player::Red, &config, &mut q_agents);
    let mut yellow = build_seat(cli.yellow, Player::Yellow, &config, &mut q_agents);

    let first = if cli.random_first && rand::rng().random_bool(0.5) {
        Player::Yellow
    } else {
        Player::Red
    };

    println!(
        "{} ({}) vs {} ({}), {} moves first",
        Player::Red.name(),
        red.name(),
        Player::Yellow.name(),
        yellow.name(),
        first.name()
    );

    let board = Board::new(config.board.rows, config.board.cols);
    let state = play(board, first, &mut red, &mut yellow)?;

    let outcome = match state.outcome() {
        Some(outcome) => outcome,
        None => bail!("game ended without an outcome"),
    };
    red.notify_game_end(outcome);
    yellow.notify_game_end(outcome);

    match outcome {
        GameOutcome::Winner(player) => println!(
            "{} wins in {} moves",
            player.name(),
            state.move_count(player)
        ),
        GameOutcome::Draw => println!("Draw"),
    }
    Ok(())
}

/// Train a Red/Yellow pair of Q-learning agents against each other.
fn trained_q_agents(config: &AppConfig, episodes: usize) -> Result<(QLearningAgent, QLearningAgent)> {
    let mut red = QLearningAgent::new(Player::Red, config.qlearning.clone());
    let mut yellow = QLearningAgent::new(Player::Yellow, config.qlearning.clone());
    if episodes > 0 {
        info!("Training Q-learning agents for {episodes} self-play episodes");
        let metrics = train(episodes, config.board.rows, config.board.cols, &mut red, &mut yellow)
            .context("Q-learning warm-up")?;
        info!(
            "Warm-up done: red {} / yellow {} / draw {}, {} + {} states",
            metrics.total_wins(Player::Red),
            metrics.total_wins(Player::Yellow),
            metrics.total_draws(),
            red.table_size(),
            yellow.table_size()
        );
    }
    Ok((red, yellow))
}

fn build_seat(
    kind: SeatKind,
    player: Player,
    config: &AppConfig,
    q_agents: &mut Option<(QLearningAgent, QLearningAgent)>,
) -> Strategy {
    match kind {
        SeatKind::Human => ExternalAgent::new(player).into(),
        SeatKind::Minimax => MinimaxAgent::new(player, config.search.depth).into(),
        SeatKind::Random => RandomAgent::new(player).into(),
        SeatKind::Qlearning => {
            let (red, yellow) = q_agents.get_or_insert_with(|| {
                (
                    QLearningAgent::new(Player::Red, config.qlearning.clone()),
                    QLearningAgent::new(Player::Yellow, config.qlearning.clone()),
                )
            });
            let slot = match player {
                Player::Red => red,
                Player::Yellow => yellow,
            };
            let fresh = QLearningAgent::new(player, config.qlearning.clone());
            std::mem::replace(slot, fresh).into()
        }
    }
}

fn play(board: Board, first: Player, red: &mut Strategy, yellow: &mut Strategy) -> Result<GameState> {
    let mut state = GameState::new(board, first);
    println!("{}", state.board());
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !state.is_terminal() {
        let player = state.current_player();
        let seat = match player {
            Player::Red => &mut *red,
            Player::Yellow => &mut *yellow,
        };

        let col = if let Strategy::External(human) = seat {
            loop {
                print!("{} column (0-{}): ", player.name(), state.board().cols() - 1);
                io::stdout().flush()?;
                let Some(line) = lines.next() else {
                    bail!("input closed before the game ended");
                };
                let Ok(col) = line?.trim().parse::<usize>() else {
                    println!("Enter a column number");
                    continue;
                };
                human.submit(col);
                match human.choose_move(state.board()) {
                    Ok(col) => break col,
                    Err(e @ StrategyError::InvalidColumn { .. }) => println!("{e}"),
                    Err(e) => return Err(e.into()),
                }
            }
        } else {
            let col = seat.choose_move(state.board())?;
            println!("{} ({}) plays column {}", player.name(), seat.name(), col);
            col
        };

        state
            .apply_move_mut(col)
            .with_context(|| format!("{} played column {}", player.name(), col))?;
        println!("{}\n", state.board());
    }

    Ok(state)
}
