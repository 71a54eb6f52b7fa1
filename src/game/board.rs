use std::fmt;

use super::player::Player;
use super::state::GameOutcome;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Number of aligned pieces needed to win; also the window length.
pub const CONNECT: usize = 4;

/// The four orientations a window can run in: horizontal, vertical,
/// down-right diagonal and up-right diagonal.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

impl Cell {
    /// Numeric code of the cell: 0 empty, 1 red, 2 yellow.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Red => 1,
            Cell::Yellow => 2,
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Red => 'X',
            Cell::Yellow => 'O',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column is full")]
    ColumnFull,
    #[error("column is out of range")]
    InvalidColumn,
    #[error("game is already over")]
    GameOver,
}

/// A rows x cols grid. Row 0 is the top, row `rows - 1` the bottom; pieces
/// stack upward from the bottom row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board with the given dimensions.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero. Use [`Board::checked`] for
    /// dimensions that come from outside the program.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "board dimensions must be non-zero");
        Board {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    /// Empty board, or `None` when either dimension is zero.
    pub fn checked(rows: usize, cols: usize) -> Option<Board> {
        (rows > 0 && cols > 0).then(|| Self::new(rows, cols))
    }

    /// Create an empty 6x7 board.
    pub fn standard() -> Self {
        Self::new(ROWS, COLS)
    }

    /// Parse a board from text rows, top row first: `.` empty, `X` red,
    /// `O` yellow. Returns `None` for ragged input, unknown symbols, or pieces
    /// floating above an empty cell.
    pub fn from_rows(lines: &[&str]) -> Option<Board> {
        let cols = lines.first()?.chars().count();
        if cols == 0 {
            return None;
        }
        let mut cells = Vec::with_capacity(lines.len() * cols);
        for line in lines {
            if line.chars().count() != cols {
                return None;
            }
            for ch in line.chars() {
                cells.push(match ch {
                    '.' => Cell::Empty,
                    'X' => Cell::Red,
                    'O' => Cell::Yellow,
                    _ => return None,
                });
            }
        }
        let board = Board {
            rows: lines.len(),
            cols,
            cells,
        };
        let floating = (1..board.rows).any(|row| {
            (0..cols).any(|col| {
                board.get(row - 1, col) != Cell::Empty && board.get(row, col) == Cell::Empty
            })
        });
        if floating {
            return None;
        }
        Some(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// True iff the top cell of `col` is empty. Out-of-range columns are never
    /// valid.
    pub fn is_valid_location(&self, col: usize) -> bool {
        col < self.cols && self.get(0, col) == Cell::Empty
    }

    /// Lowest empty row in `col`, or `None` when the column is full.
    pub fn next_open_row(&self, col: usize) -> Option<usize> {
        (0..self.rows)
            .rev()
            .find(|&row| self.get(row, col) == Cell::Empty)
    }

    /// Unconditionally place `player`'s piece at (row, col). The caller is
    /// responsible for having picked the column's open row.
    pub fn drop_piece(&mut self, row: usize, col: usize, player: Player) {
        self.cells[row * self.cols + col] = player.to_cell();
    }

    /// Checked drop: place `player`'s piece in `col` and return the landing row.
    pub fn play(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if col >= self.cols {
            return Err(MoveError::InvalidColumn);
        }
        let row = self.next_open_row(col).ok_or(MoveError::ColumnFull)?;
        self.drop_piece(row, col, player);
        Ok(row)
    }

    /// Board after dropping `player`'s piece into `col`, leaving `self` intact.
    /// Returns `None` when the column cannot take a piece.
    pub fn with_move(&self, col: usize, player: Player) -> Option<Board> {
        let mut next = self.clone();
        next.play(col, player).ok()?;
        Some(next)
    }

    /// Every run of [`CONNECT`] consecutive cells along the four orientations.
    pub fn windows(&self) -> impl Iterator<Item = [Cell; CONNECT]> + '_ {
        DIRECTIONS.iter().flat_map(move |&(dr, dc)| {
            (0..self.rows).flat_map(move |row| {
                (0..self.cols).filter_map(move |col| self.window_at(row, col, dr, dc))
            })
        })
    }

    fn window_at(&self, row: usize, col: usize, dr: isize, dc: isize) -> Option<[Cell; CONNECT]> {
        let span = CONNECT as isize - 1;
        let end_row = row as isize + dr * span;
        let end_col = col as isize + dc * span;
        if end_row < 0 || end_row >= self.rows as isize || end_col >= self.cols as isize {
            return None;
        }
        let mut window = [Cell::Empty; CONNECT];
        for (i, slot) in window.iter_mut().enumerate() {
            let r = (row as isize + dr * i as isize) as usize;
            let c = (col as isize + dc * i as isize) as usize;
            *slot = self.get(r, c);
        }
        Some(window)
    }

    /// True iff some window is filled entirely with `player`'s pieces.
    pub fn winning_move(&self, player: Player) -> bool {
        let cell = player.to_cell();
        self.windows().any(|window| window.iter().all(|&c| c == cell))
    }

    /// Game result, or `None` while the game is still running. A win takes
    /// precedence over a full board.
    pub fn winner_value(&self) -> Option<GameOutcome> {
        if self.winning_move(Player::Red) {
            return Some(GameOutcome::Winner(Player::Red));
        }
        if self.winning_move(Player::Yellow) {
            return Some(GameOutcome::Winner(Player::Yellow));
        }
        if self.is_full() {
            return Some(GameOutcome::Draw);
        }
        None
    }

    /// Playable columns in ascending order.
    pub fn valid_locations(&self) -> Vec<usize> {
        (0..self.cols)
            .filter(|&col| self.is_valid_location(col))
            .collect()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        !(0..self.cols).any(|col| self.is_valid_location(col))
    }

    /// Number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            let line: Vec<String> = (0..self.cols)
                .map(|col| self.get(row, col).symbol().to_string())
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        let footer: Vec<String> = (0..self.cols).map(|col| (col % 10).to_string()).collect();
        write!(f, "{}", footer.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drop(board: &mut Board, col: usize, player: Player) -> usize {
        board.play(col, player).unwrap()
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::standard();
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
        assert_eq!(board.valid_locations(), vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(board.winner_value(), None);
    }

    #[test]
    fn test_drop_piece() {
        let mut board = Board::standard();

        let row = board.next_open_row(3).unwrap();
        assert_eq!(row, 5);
        board.drop_piece(row, 3, Player::Red);
        assert_eq!(board.get(5, 3), Cell::Red);

        let row = board.next_open_row(3).unwrap();
        assert_eq!(row, 4);
        board.drop_piece(row, 3, Player::Yellow);
        assert_eq!(board.get(4, 3), Cell::Yellow);
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::standard();
        for _ in 0..ROWS {
            drop(&mut board, 0, Player::Red);
        }

        assert!(!board.is_valid_location(0));
        assert_eq!(board.next_open_row(0), None);
        assert_eq!(board.play(0, Player::Yellow), Err(MoveError::ColumnFull));
        assert_eq!(board.valid_locations(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::standard();
        assert!(!board.is_valid_location(7));
        assert_eq!(board.play(7, Player::Red), Err(MoveError::InvalidColumn));
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::standard();
        for col in 0..COLS {
            for _ in 0..ROWS {
                drop(&mut board, col, Player::Red);
            }
        }
        assert!(board.is_full());
        assert!(board.valid_locations().is_empty());
    }

    #[test]
    fn test_window_count_on_standard_board() {
        // 24 horizontal + 21 vertical + 12 + 12 diagonal
        assert_eq!(Board::standard().windows().count(), 69);
        // 4x4 board: 4 + 4 + 1 + 1
        assert_eq!(Board::new(4, 4).windows().count(), 10);
        assert_eq!(Board::new(3, 3).windows().count(), 0);
    }

    #[test]
    fn test_checked_rejects_zero_dimensions() {
        assert!(Board::checked(0, 7).is_none());
        assert!(Board::checked(6, 0).is_none());
        let board = Board::checked(2, 3).unwrap();
        assert_eq!((board.rows(), board.cols()), (2, 3));
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::standard();
        for col in [3, 2, 4, 1] {
            drop(&mut board, col, Player::Red);
        }
        assert!(board.winning_move(Player::Red));
        assert!(!board.winning_move(Player::Yellow));
        assert_eq!(board.winner_value(), Some(GameOutcome::Winner(Player::Red)));
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::standard();
        for _ in 0..4 {
            drop(&mut board, 3, Player::Yellow);
        }
        assert!(board.winning_move(Player::Yellow));
        assert_eq!(
            board.winner_value(),
            Some(GameOutcome::Winner(Player::Yellow))
        );
    }

    #[test]
    fn test_diagonal_up_win() {
        let mut board = Board::standard();
        drop(&mut board, 0, Player::Red);

        drop(&mut board, 1, Player::Yellow);
        drop(&mut board, 1, Player::Red);

        drop(&mut board, 2, Player::Yellow);
        drop(&mut board, 2, Player::Yellow);
        drop(&mut board, 2, Player::Red);

        drop(&mut board, 3, Player::Yellow);
        drop(&mut board, 3, Player::Yellow);
        drop(&mut board, 3, Player::Yellow);
        assert!(!board.winning_move(Player::Red));
        drop(&mut board, 3, Player::Red);

        assert!(board.winning_move(Player::Red));
    }

    #[test]
    fn test_diagonal_down_win() {
        let mut board = Board::standard();
        drop(&mut board, 6, Player::Red);

        drop(&mut board, 5, Player::Yellow);
        drop(&mut board, 5, Player::Red);

        drop(&mut board, 4, Player::Yellow);
        drop(&mut board, 4, Player::Yellow);
        drop(&mut board, 4, Player::Red);

        drop(&mut board, 3, Player::Yellow);
        drop(&mut board, 3, Player::Yellow);
        drop(&mut board, 3, Player::Yellow);
        drop(&mut board, 3, Player::Red);

        assert!(board.winning_move(Player::Red));
    }

    #[test]
    fn test_no_win_with_three() {
        let mut board = Board::standard();
        for col in 0..3 {
            drop(&mut board, col, Player::Red);
        }
        assert!(!board.winning_move(Player::Red));
        assert_eq!(board.winner_value(), None);
    }

    #[test]
    fn test_tie_on_full_board_without_runs() {
        let board = Board::from_rows(&[
            "XXOOXXO",
            "XXOOXXO",
            "XXOOXXO",
            "OOXXOOX",
            "XXOOXXO",
            "XXOOXXO",
        ])
        .unwrap();
        assert!(board.is_full());
        assert!(!board.winning_move(Player::Red));
        assert!(!board.winning_move(Player::Yellow));
        assert_eq!(board.winner_value(), Some(GameOutcome::Draw));
    }

    #[test]
    fn test_from_rows_rejects_floating_pieces() {
        assert!(Board::from_rows(&["X...", "....", "....", "...."]).is_none());
        assert!(Board::from_rows(&["....", "...."]).is_some());
        assert!(Board::from_rows(&["....", "..."]).is_none());
        assert!(Board::from_rows(&[]).is_none());
    }

    #[test]
    fn test_win_takes_precedence_over_full_board() {
        let mut board = Board::new(4, 4);
        for col in 0..4 {
            for _ in 0..4 {
                drop(&mut board, col, Player::Yellow);
            }
        }
        assert!(board.is_full());
        assert_eq!(
            board.winner_value(),
            Some(GameOutcome::Winner(Player::Yellow))
        );
    }

    #[test]
    fn test_with_move_leaves_original_untouched() {
        let board = Board::standard();
        let next = board.with_move(2, Player::Red).unwrap();
        assert_eq!(board.piece_count(), 0);
        assert_eq!(next.get(5, 2), Cell::Red);
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(4, 4);
        drop(&mut board, 1, Player::Red);
        drop(&mut board, 1, Player::Yellow);
        let text = board.to_string();
        assert_eq!(text, ". . . .\n. . . .\n. O . .\n. X . .\n0 1 2 3");
    }
}
