use std::fmt;

use crate::error::IllegalMoveError;

use super::player::Symbol;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Length of a winning run.
pub const RUN: usize = 4;

/// Run directions as (row step, column step): rightward, downward,
/// down-right, and up-right.
pub(crate) const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn as_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Columns that can still take a piece, in ascending order.
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, symbol: Symbol) -> Result<usize, IllegalMoveError> {
        if col >= COLS {
            return Err(IllegalMoveError::OutOfRange(col));
        }

        // Lowest empty row wins
        for row in (0..ROWS).rev() {
            if self.cells[row][col] == Cell::Empty {
                self.cells[row][col] = symbol.to_cell();
                return Ok(row);
            }
        }

        Err(IllegalMoveError::ColumnFull(col))
    }

    /// Clear a cell. Only valid for the topmost piece of a column, otherwise
    /// the column would be left with a gap.
    pub fn remove(&mut self, row: usize, col: usize) {
        debug_assert!(
            row == 0 || self.cells[row - 1][col] == Cell::Empty,
            "removing ({row}, {col}) would leave a floating piece"
        );
        self.cells[row][col] = Cell::Empty;
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Number of occupied cells.
    pub fn move_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    /// Occupied cells in a column are contiguous from the bottom row up.
    pub fn is_gravity_consistent(&self) -> bool {
        (0..COLS).all(|col| {
            let mut seen_empty = false;
            for row in (0..ROWS).rev() {
                match self.cells[row][col] {
                    Cell::Empty => seen_empty = true,
                    _ if seen_empty => return false,
                    _ => {}
                }
            }
            true
        })
    }

    /// Coordinates of the run of [`RUN`] cells starting at (row, col) in the
    /// given direction, or `None` if any of them falls off the board.
    pub(crate) fn run_from(
        row: usize,
        col: usize,
        (dr, dc): (isize, isize),
    ) -> Option<[(usize, usize); RUN]> {
        let mut run = [(0, 0); RUN];
        for (i, slot) in run.iter_mut().enumerate() {
            let r = row as isize + dr * i as isize;
            let c = col as isize + dc * i as isize;
            if r < 0 || c < 0 || r >= ROWS as isize || c >= COLS as isize {
                return None;
            }
            *slot = (r as usize, c as usize);
        }
        Some(run)
    }

    /// Every in-bounds run of [`RUN`] cells on the board.
    pub(crate) fn runs() -> impl Iterator<Item = [(usize, usize); RUN]> {
        (0..ROWS).flat_map(|row| {
            (0..COLS).flat_map(move |col| {
                DIRECTIONS
                    .iter()
                    .filter_map(move |&dir| Self::run_from(row, col, dir))
            })
        })
    }

    /// Rows from top to bottom as strings, e.g. `"...X..."`.
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.as_char()).collect())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            write!(f, "|")?;
            for cell in row {
                write!(f, " {} |", cell.as_char())?;
            }
            writeln!(f)?;
        }
        writeln!(f, "+{}", "---+".repeat(COLS))?;
        write!(f, " ")?;
        for col in 0..COLS {
            write!(f, " {}  ", col + 1)?;
        }
        Ok(())
    }
}

/// True if `symbol` owns four consecutive cells anywhere on the board.
///
/// Scans every cell as a potential run start in all four directions. Only the
/// symbol that just moved can have completed a line, so callers check the
/// mover alone.
pub fn check_winner(board: &Board, symbol: Symbol) -> bool {
    let target = symbol.to_cell();
    Board::runs().any(|run| run.iter().all(|&(r, c)| board.get(r, c) == target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn board_from(rows: [&str; ROWS]) -> Board {
        let mut board = Board::new();
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                board.cells[r][c] = match ch {
                    'X' => Cell::X,
                    'O' => Cell::O,
                    _ => Cell::Empty,
                };
            }
        }
        board
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
        assert_eq!(board.legal_columns(), vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(board.move_count(), 0);
    }

    #[test]
    fn test_drop_piece() {
        let mut board = Board::new();

        let row = board.drop_piece(3, Symbol::X).unwrap();
        assert_eq!(row, 5);
        assert_eq!(board.get(5, 3), Cell::X);

        let row = board.drop_piece(3, Symbol::O).unwrap();
        assert_eq!(row, 4);
        assert_eq!(board.get(4, 3), Cell::O);
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::new();
        for _ in 0..ROWS {
            board.drop_piece(0, Symbol::X).unwrap();
        }

        let before = board;
        assert!(board.is_column_full(0));
        assert_eq!(
            board.drop_piece(0, Symbol::O),
            Err(IllegalMoveError::ColumnFull(0))
        );
        assert_eq!(board, before, "failed drop must not touch the board");
        assert!(!board.legal_columns().contains(&0));
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::new();
        assert_eq!(
            board.drop_piece(7, Symbol::X),
            Err(IllegalMoveError::OutOfRange(7))
        );
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new();
        for col in 0..COLS {
            for _ in 0..ROWS {
                board.drop_piece(col, Symbol::X).unwrap();
            }
        }
        assert!(board.is_full());
        assert!(board.legal_columns().is_empty());
    }

    #[test]
    fn test_remove_restores_empty_cell() {
        let mut board = Board::new();
        board.drop_piece(2, Symbol::X).unwrap();
        let row = board.drop_piece(2, Symbol::O).unwrap();
        board.remove(row, 2);
        assert_eq!(board.get(row, 2), Cell::Empty);
        assert_eq!(board.get(5, 2), Cell::X);
        assert_eq!(board.drop_piece(2, Symbol::X).unwrap(), row);
    }

    #[test]
    fn gravity_holds_for_random_drop_sequences() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let mut board = Board::new();
            let mut symbol = Symbol::X;
            loop {
                let legal = board.legal_columns();
                if legal.is_empty() {
                    break;
                }
                let col = legal[rng.random_range(0..legal.len())];
                board.drop_piece(col, symbol).unwrap();
                assert!(board.is_gravity_consistent());
                symbol = symbol.other();
            }
            assert!(board.is_full());
        }
    }

    #[test]
    fn test_horizontal_win_bottom_row() {
        let board = board_from([
            ".......", ".......", ".......", ".......", ".......", "XXXX...",
        ]);
        assert!(check_winner(&board, Symbol::X));
        assert!(!check_winner(&board, Symbol::O));
    }

    #[test]
    fn test_vertical_win_column_zero() {
        let board = board_from([
            ".......", ".......", "O......", "O......", "O......", "O......",
        ]);
        assert!(check_winner(&board, Symbol::O));
        assert!(!check_winner(&board, Symbol::X));
    }

    #[test]
    fn test_ascending_diagonal_win() {
        // (5,0) (4,1) (3,2) (2,3)
        let board = board_from([
            ".......", ".......", "...X...", "..XO...", ".XOO...", "XOOO...",
        ]);
        assert!(check_winner(&board, Symbol::X));
        assert!(!check_winner(&board, Symbol::O));
    }

    #[test]
    fn test_descending_diagonal_win() {
        // (2,0) (3,1) (4,2) (5,3)
        let board = board_from([
            ".......", ".......", "X......", "OX.....", "OOX....", "OOOX...",
        ]);
        assert!(check_winner(&board, Symbol::X));
        assert!(!check_winner(&board, Symbol::O));
    }

    #[test]
    fn test_runs_at_far_edges() {
        let top_right = board_from([
            "...OOOO", ".......", ".......", ".......", ".......", ".......",
        ]);
        assert!(check_winner(&top_right, Symbol::O));

        let right_column = board_from([
            "......X", "......X", "......X", "......X", ".......", ".......",
        ]);
        assert!(check_winner(&right_column, Symbol::X));
    }

    #[test]
    fn test_no_win_with_three() {
        let board = board_from([
            ".......", ".......", ".......", ".......", ".......", "XXX.XXX",
        ]);
        assert!(!check_winner(&board, Symbol::X));
    }

    #[test]
    fn test_full_board_without_four_is_draw() {
        let board = board_from([
            "XXOOXXO", "OOXXOOX", "XXOOXXO", "OOXXOOX", "XXOOXXO", "OOXXOOX",
        ]);
        assert!(board.is_full());
        assert_eq!(board.move_count(), ROWS * COLS);
        assert!(!check_winner(&board, Symbol::X));
        assert!(!check_winner(&board, Symbol::O));
    }

    #[test]
    fn test_run_count() {
        // 24 horizontal + 21 vertical + 12 + 12 diagonal
        assert_eq!(Board::runs().count(), 69);
    }

    #[test]
    fn test_display_shows_pieces_and_column_numbers() {
        let mut board = Board::new();
        board.drop_piece(0, Symbol::X).unwrap();
        let text = board.to_string();
        assert!(text.contains("| X |"));
        assert!(text.trim_end().ends_with('7'));
        assert_eq!(board.rows()[5], "X......");
    }
}
