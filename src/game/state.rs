use super::{Board, MoveError, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

impl GameOutcome {
    /// Numeric result code: 1 red wins, 2 yellow wins, 3 draw. A running game
    /// has no outcome and reports 0 through [`GameOutcome::code_of`].
    pub fn code(self) -> u8 {
        match self {
            GameOutcome::Winner(player) => player.number(),
            GameOutcome::Draw => 3,
        }
    }

    pub fn code_of(outcome: Option<GameOutcome>) -> u8 {
        outcome.map_or(0, GameOutcome::code)
    }
}

/// Authoritative game as seen by a driver: the board, whose turn it is, the
/// result once decided, and how many moves each side has made.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    outcome: Option<GameOutcome>,
    move_counts: [usize; 2],
}

impl GameState {
    /// Create a 6x7 game with Red to move.
    pub fn initial() -> Self {
        Self::new(Board::standard(), Player::Red)
    }

    /// Start a game on `board` with `first` to move.
    pub fn new(board: Board, first: Player) -> Self {
        let outcome = board.winner_value();
        GameState {
            board,
            current_player: first,
            outcome,
            move_counts: [0, 0],
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Moves made so far by `player`.
    pub fn move_count(&self, player: Player) -> usize {
        self.move_counts[player.index()]
    }

    /// Get list of legal columns (not full)
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.valid_locations()
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move(&self, column: usize) -> Result<GameState, MoveError> {
        let mut next = self.clone();
        next.apply_move_mut(column)?;
        Ok(next)
    }

    /// Apply move mutably
    pub fn apply_move_mut(&mut self, column: usize) -> Result<(), MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        self.board.play(column, self.current_player)?;
        self.move_counts[self.current_player.index()] += 1;
        self.outcome = self.board.winner_value();
        self.current_player = self.current_player.other();

        Ok(())
    }
}
