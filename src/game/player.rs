use super::board::Cell;

/// One of the two sides. Red is player 1 and Yellow is player 2 wherever
/// players are shown as numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Red,
    Yellow,
}

impl Player {
    /// Both sides in seat order.
    pub const BOTH: [Player; 2] = [Player::Red, Player::Yellow];

    pub fn other(self) -> Player {
        match self {
            Player::Red => Player::Yellow,
            Player::Yellow => Player::Red,
        }
    }

    /// The piece this side drops.
    pub fn to_cell(self) -> Cell {
        match self {
            Player::Red => Cell::Red,
            Player::Yellow => Cell::Yellow,
        }
    }

    /// 1 for Red, 2 for Yellow; matches the cell code of the side's pieces.
    pub fn number(self) -> u8 {
        self.to_cell().code()
    }

    /// Inverse of [`Player::number`].
    pub fn from_number(number: u8) -> Option<Player> {
        match number {
            1 => Some(Player::Red),
            2 => Some(Player::Yellow),
            _ => None,
        }
    }

    /// Zero-based seat, for per-player counters.
    pub fn index(self) -> usize {
        match self {
            Player::Red => 0,
            Player::Yellow => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Player::Red => "Red",
            Player::Yellow => "Yellow",
        }
    }
}
