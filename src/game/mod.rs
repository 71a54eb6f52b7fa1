//! Core Connect Four game logic: a rows x cols board with gravity drops and
//! window-based win detection, player types, and the driver-side game state.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, MoveError, COLS, CONNECT, ROWS};
pub use player::Player;
pub use state::{GameOutcome, GameState};
