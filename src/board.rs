//! Game board representation and line clearing

use crate::tetromino::Color;

/// Standard Tetris board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// Smallest board edge that still fits every piece in every rotation
pub const MIN_BOARD_SIZE: usize = 4;

/// A cell on the board - either empty or filled with a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    /// The color of a filled cell
    pub fn color(&self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Filled(color) => Some(*color),
        }
    }
}

/// The game board
///
/// Row 0 is the top of the well and rows grow downward. Every access takes
/// signed coordinates: out-of-bounds reads yield [`Cell::Empty`] and
/// out-of-bounds writes are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Grid stored as [row][col]; every row holds exactly `width` cells
    rows: Vec<Vec<Cell>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}

impl Board {
    /// Create a new empty board, at least [`MIN_BOARD_SIZE`] on each edge
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(MIN_BOARD_SIZE);
        let height = height.max(MIN_BOARD_SIZE);
        Self {
            width,
            height,
            rows: vec![vec![Cell::Empty; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, row: i32, col: i32) -> Option<(usize, usize)> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.height || col >= self.width {
            return None;
        }
        Some((row, col))
    }

    /// Fill a cell with a color; ignored when out of bounds
    pub fn set_cell(&mut self, row: i32, col: i32, color: Color) {
        if let Some((r, c)) = self.index(row, col) {
            self.rows[r][c] = Cell::Filled(color);
        }
    }

    /// Empty a cell; ignored when out of bounds
    pub fn clear_cell(&mut self, row: i32, col: i32) {
        if let Some((r, c)) = self.index(row, col) {
            self.rows[r][c] = Cell::Empty;
        }
    }

    /// Get the cell at a position (row, col)
    pub fn get_cell(&self, row: i32, col: i32) -> Cell {
        self.index(row, col)
            .map(|(r, c)| self.rows[r][c])
            .unwrap_or_default()
    }

    pub fn is_empty(&self, row: i32, col: i32) -> bool {
        self.get_cell(row, col).is_empty()
    }

    /// Check if a position is valid (within bounds and empty)
    ///
    /// This is the only test for "can a block occupy this cell".
    pub fn is_valid_position(&self, row: i32, col: i32) -> bool {
        match self.index(row, col) {
            Some((r, c)) => self.rows[r][c].is_empty(),
            None => false,
        }
    }

    /// Lock a set of blocks onto the board
    pub fn lock_piece(&mut self, positions: &[(i32, i32)], color: Color) {
        for &(row, col) in positions {
            self.set_cell(row, col, color);
        }
    }

    /// Indices of every fully occupied row, ascending
    pub fn complete_lines(&self) -> Vec<usize> {
        (0..self.height)
            .filter(|&row| self.is_line_full(row))
            .collect()
    }

    /// Remove the given rows and shift everything above them down
    ///
    /// Input order and duplicates don't matter, and out-of-range rows are
    /// skipped. Returns the number of rows actually removed.
    pub fn clear_lines(&mut self, lines: &[usize]) -> usize {
        let mut remove = vec![false; self.height];
        for &line in lines {
            if line < self.height {
                remove[line] = true;
            }
        }

        // Compact from the bottom up: surviving rows keep their relative order
        let mut write_row = self.height;
        for read_row in (0..self.height).rev() {
            if !remove[read_row] {
                write_row -= 1;
                if write_row != read_row {
                    self.rows.swap(write_row, read_row);
                }
            }
        }

        // Fill the top with empty rows
        for row in &mut self.rows[..write_row] {
            row.fill(Cell::Empty);
        }

        write_row
    }

    /// Check if a line is completely filled
    fn is_line_full(&self, row: usize) -> bool {
        self.rows[row].iter().all(|cell| cell.is_filled())
    }

    /// Game over once anything occupies the top row
    pub fn is_game_over(&self) -> bool {
        self.rows
            .first()
            .is_some_and(|row| row.iter().any(|cell| cell.is_filled()))
    }

    /// Check if the board is completely empty
    pub fn is_board_empty(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    /// Empty every cell
    pub fn reset(&mut self) {
        for row in &mut self.rows {
            row.fill(Cell::Empty);
        }
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }
}
