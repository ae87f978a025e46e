use crate::errors::GameError;
use crate::seat::{Cell, Seat};
use serde::{Deserialize, Serialize};

/// Run length needed to win, independent of the board size.
pub const CONNECT_LENGTH: usize = 4;
pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLS: usize = 7;
pub const MIN_DIMENSION: usize = 4;
pub const MAX_DIMENSION: usize = 12;

/// Horizontal, vertical, diagonal up-right and diagonal down-right, as
/// (row step, column step). Row 0 is the top of the board.
const AXES: [(isize, isize); 4] = [(0, 1), (1, 0), (-1, 1), (1, 1)];

/// A board coordinate. Row 0 is the top row.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A `rows x cols` gravity board.
///
/// Pieces only enter through [`Board::drop_piece`], so the occupied cells of
/// every column stay contiguous from the bottom row upward.
///
/// # Examples
///
/// ```
/// use fourline_engine::board::Board;
/// use fourline_engine::seat::Seat;
///
/// let mut board = Board::standard();
/// let row = board.drop_piece(3, Seat::One).expect("empty column");
/// assert_eq!(row, 5);
/// assert_eq!(board.lowest_empty_row(3), Ok(4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(rows: usize, cols: usize) -> Result<Self, GameError> {
        let valid = MIN_DIMENSION..=MAX_DIMENSION;
        if !valid.contains(&rows) || !valid.contains(&cols) {
            return Err(GameError::InvalidDimensions {
                rows,
                cols,
                min: MIN_DIMENSION,
                max: MAX_DIMENSION,
            });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        })
    }

    /// The classic 6x7 board.
    pub fn standard() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            cells: vec![Cell::Empty; DEFAULT_ROWS * DEFAULT_COLS],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.rows && col < self.cols {
            Some(self.cells[self.index(row, col)])
        } else {
            None
        }
    }

    /// Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.cols {
            return true;
        }
        !self.cells[self.index(0, col)].is_empty()
    }

    pub fn is_full(&self) -> bool {
        (0..self.cols).all(|col| self.is_column_full(col))
    }

    /// Columns that can still take a piece, left to right.
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..self.cols)
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// Row a piece dropped into `col` would land on.
    pub fn lowest_empty_row(&self, col: usize) -> Result<usize, GameError> {
        self.check_column(col)?;
        (0..self.rows)
            .rev()
            .find(|&row| self.cells[self.index(row, col)].is_empty())
            .ok_or(GameError::ColumnFull { column: col })
    }

    /// Drop a piece for `seat`, returning the landing row.
    pub fn drop_piece(&mut self, col: usize, seat: Seat) -> Result<usize, GameError> {
        let row = self.lowest_empty_row(col)?;
        let idx = self.index(row, col);
        self.cells[idx] = Cell::from(seat);
        Ok(row)
    }

    /// The full run through `(row, col)` on the first axis reaching
    /// [`CONNECT_LENGTH`], or `None`. The run is ordered end to end and is not
    /// capped at the connect length.
    pub fn winning_run(&self, row: usize, col: usize) -> Option<Vec<Position>> {
        let owner = self.get(row, col)?;
        if owner.is_empty() {
            return None;
        }
        let origin = Position::new(row, col);
        AXES.iter()
            .map(|&axis| self.run_along(origin, owner, axis))
            .find(|run| run.len() >= CONNECT_LENGTH)
    }

    /// Whether dropping a `seat` piece into `col` wins on the spot.
    ///
    /// The probe piece is removed before returning, so the board is unchanged
    /// afterwards. Taking `&mut self` means nobody else can observe the board
    /// while the probe is in place.
    pub fn would_win(&mut self, col: usize, seat: Seat) -> bool {
        let Ok(row) = self.lowest_empty_row(col) else {
            return false;
        };
        let idx = self.index(row, col);
        self.cells[idx] = Cell::from(seat);
        let wins = self.winning_run(row, col).is_some();
        self.cells[idx] = Cell::Empty;
        wins
    }

    /// Row-major copy of the grid, top row first.
    pub fn to_grid(&self) -> Vec<Vec<Cell>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.to_vec())
            .collect()
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    fn check_column(&self, col: usize) -> Result<(), GameError> {
        if col >= self.cols {
            return Err(GameError::InvalidColumn {
                column: col,
                cols: self.cols,
            });
        }
        Ok(())
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn run_along(&self, origin: Position, owner: Cell, (dr, dc): (isize, isize)) -> Vec<Position> {
        let mut run = self.walk(origin, owner, (-dr, -dc));
        run.reverse();
        run.push(origin);
        run.extend(self.walk(origin, owner, (dr, dc)));
        run
    }

    fn walk(&self, from: Position, owner: Cell, (dr, dc): (isize, isize)) -> Vec<Position> {
        let mut visited = Vec::new();
        let mut next = self.step(from, dr, dc);
        while let Some(pos) = next {
            if self.cells[self.index(pos.row, pos.col)] != owner {
                break;
            }
            visited.push(pos);
            next = self.step(pos, dr, dc);
        }
        visited
    }

    fn step(&self, pos: Position, dr: isize, dc: isize) -> Option<Position> {
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        (row < self.rows && col < self.cols).then_some(Position { row, col })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn positions(cells: &[(usize, usize)]) -> BTreeSet<Position> {
        cells.iter().map(|&(r, c)| Position::new(r, c)).collect()
    }

    #[test]
    fn rejects_out_of_range_dimensions() {
        assert!(matches!(
            Board::new(3, 7),
            Err(GameError::InvalidDimensions { rows: 3, .. })
        ));
        assert!(Board::new(6, MAX_DIMENSION + 1).is_err());
        assert!(Board::new(MIN_DIMENSION, MAX_DIMENSION).is_ok());
    }

    #[test]
    fn pieces_stack_from_the_bottom() {
        let mut board = Board::standard();
        assert_eq!(board.drop_piece(2, Seat::One), Ok(5));
        assert_eq!(board.drop_piece(2, Seat::Two), Ok(4));
        assert_eq!(board.get(5, 2), Some(Cell::Seat1));
        assert_eq!(board.get(4, 2), Some(Cell::Seat2));
        assert_eq!(board.get(3, 2), Some(Cell::Empty));
    }

    #[test]
    fn full_and_invalid_columns_are_reported() {
        let mut board = Board::new(4, 4).expect("board");
        for _ in 0..4 {
            board.drop_piece(0, Seat::One).expect("drop");
        }
        assert_eq!(
            board.lowest_empty_row(0),
            Err(GameError::ColumnFull { column: 0 })
        );
        assert_eq!(
            board.drop_piece(4, Seat::Two),
            Err(GameError::InvalidColumn { column: 4, cols: 4 })
        );
        assert_eq!(board.legal_columns(), vec![1, 2, 3]);
    }

    #[test]
    fn winning_run_is_not_capped_at_four() {
        let mut board = Board::standard();
        for col in [0, 1, 2, 4, 5] {
            board.drop_piece(col, Seat::Two).expect("drop");
        }
        board.drop_piece(3, Seat::Two).expect("drop");
        let run = board.winning_run(5, 3).expect("six in a row");
        assert_eq!(run.len(), 6);
        assert_eq!(run.first(), Some(&Position::new(5, 0)));
        assert_eq!(run.last(), Some(&Position::new(5, 5)));
    }

    #[test]
    fn detects_runs_from_any_cell_on_every_axis() {
        // Diagonal going up to the right: (5,0) (4,1) (3,2) (2,3)
        let mut board = Board::standard();
        let fill = [(1, 1), (2, 2), (3, 3)];
        for (col, fillers) in fill {
            for _ in 0..fillers {
                board.drop_piece(col, Seat::Two).expect("filler");
            }
        }
        for col in 0..4 {
            board.drop_piece(col, Seat::One).expect("diagonal");
        }
        let expected = positions(&[(5, 0), (4, 1), (3, 2), (2, 3)]);
        for pos in &expected {
            let run = board.winning_run(pos.row, pos.col).expect("diagonal run");
            assert_eq!(run.into_iter().collect::<BTreeSet<_>>(), expected);
        }

        // Vertical and horizontal
        let mut board = Board::standard();
        for _ in 0..4 {
            board.drop_piece(6, Seat::Two).expect("vertical");
        }
        for col in 0..4 {
            board.drop_piece(col, Seat::One).expect("horizontal");
        }
        for row in 2..6 {
            assert!(board.winning_run(row, 6).is_some());
        }
        for col in 0..4 {
            assert!(board.winning_run(5, col).is_some());
        }
    }

    #[test]
    fn detects_diagonal_down_right() {
        // (2,0) (3,1) (4,2) (5,3)
        let mut board = Board::standard();
        for (col, fillers) in [(0, 3), (1, 2), (2, 1)] {
            for _ in 0..fillers {
                board.drop_piece(col, Seat::Two).expect("filler");
            }
        }
        for col in 0..4 {
            board.drop_piece(col, Seat::One).expect("diagonal");
        }
        let expected = positions(&[(2, 0), (3, 1), (4, 2), (5, 3)]);
        for pos in &expected {
            let run = board.winning_run(pos.row, pos.col).expect("diagonal run");
            assert_eq!(run.into_iter().collect::<BTreeSet<_>>(), expected);
        }
    }

    #[test]
    fn three_is_not_a_win() {
        let mut board = Board::standard();
        for col in 0..3 {
            board.drop_piece(col, Seat::One).expect("drop");
        }
        assert!(board.winning_run(5, 1).is_none());
        assert!(board.winning_run(0, 0).is_none());
    }

    #[test]
    fn would_win_leaves_board_untouched() {
        let mut board = Board::standard();
        for col in 0..3 {
            board.drop_piece(col, Seat::One).expect("drop");
        }
        board.drop_piece(6, Seat::Two).expect("drop");
        for col in 0..board.cols() {
            for seat in Seat::ALL {
                let before = board.clone();
                let _ = board.would_win(col, seat);
                assert_eq!(board, before);
            }
        }
        assert!(board.would_win(3, Seat::One));
        assert!(!board.would_win(3, Seat::Two));
        assert!(!board.would_win(42, Seat::One));
    }

    #[test]
    fn grid_is_row_major_top_first() {
        let mut board = Board::new(4, 5).expect("board");
        board.drop_piece(4, Seat::Two).expect("drop");
        let grid = board.to_grid();
        assert_eq!(grid.len(), 4);
        assert_eq!(grid[3][4], Cell::Seat2);
        assert!(grid[0].iter().all(|c| c.is_empty()));
        board.clear();
        assert_eq!(board, Board::new(4, 5).expect("board"));
    }
}
