use crate::ai::{Agent, QLearningAgent, RandomAgent};
use crate::error::TrainingError;
use crate::game::{Board, GameOutcome, GameState, Player};

/// A finished game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub outcome: GameOutcome,
    pub moves: Vec<usize>,
    pub final_board: Board,
}

/// Play one game on `board` until it is decided. `first` moves first and
/// `second` must play the other colour. Agents are not notified of the result.
pub fn play_game(
    board: Board,
    first: &mut dyn Agent,
    second: &mut dyn Agent,
) -> Result<GameRecord, TrainingError> {
    let first_player = first.player();
    if second.player() == first_player {
        return Err(TrainingError::SameSide(first_player));
    }
    let mut state = GameState::new(board, first_player);
    let mut moves = Vec::new();

    while !state.is_terminal() {
        let agent: &mut dyn Agent = if state.current_player() == first_player {
            &mut *first
        } else {
            &mut *second
        };
        let action = agent.choose_move(state.board())?;
        let legal = state.legal_actions();
        state
            .apply_move_mut(action)
            .map_err(|_| TrainingError::IllegalAction { action, legal })?;
        moves.push(action);
    }

    let outcome = state.outcome().ok_or(TrainingError::MissingOutcome)?;
    Ok(GameRecord {
        outcome,
        moves,
        final_board: state.board().clone(),
    })
}

/// Empty rows x cols board for a training or evaluation game.
pub(crate) fn fresh_board(rows: usize, cols: usize) -> Result<Board, TrainingError> {
    Board::checked(rows, cols).ok_or(TrainingError::InvalidBoard { rows, cols })
}

/// Greedy win rate of `agent` against [`RandomAgent`] over `games` games on a
/// rows x cols board, with Red moving first. Learning is switched off for the
/// duration, so the table gains no entries and keeps its values; the agent's
/// exploration rate and learning flag are restored afterwards.
pub fn evaluate(
    agent: &mut QLearningAgent,
    rows: usize,
    cols: usize,
    games: usize,
    seed: u64,
) -> Result<f32, TrainingError> {
    fresh_board(rows, cols)?;
    if games == 0 {
        return Ok(0.0);
    }

    let saved_epsilon = agent.epsilon();
    let saved_learning = agent.is_learning();
    agent.set_epsilon(0.0);
    agent.set_learning(false);

    let me = agent.player();
    let mut wins = 0;
    let mut result = Ok(());
    for game_idx in 0..games {
        let mut random = RandomAgent::with_seed(me.other(), seed.wrapping_add(game_idx as u64));
        let board = fresh_board(rows, cols)?;
        let record = match me {
            Player::Red => play_game(board, &mut *agent, &mut random),
            Player::Yellow => play_game(board, &mut random, &mut *agent),
        };
        agent.reset();
        match record {
            Ok(record) if record.outcome == GameOutcome::Winner(me) => wins += 1,
            Ok(_) => {}
            Err(e) => {
                result = Err(e);
                break;
            }
        }
    }

    agent.set_epsilon(saved_epsilon);
    agent.set_learning(saved_learning);
    result?;
    Ok(wins as f32 / games as f32)
}
