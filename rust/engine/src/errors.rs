use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Column {column} is outside the board (0..{cols})")]
    InvalidColumn { column: usize, cols: usize },
    #[error("Column {column} is full")]
    ColumnFull { column: usize },
    #[error("Game is already over")]
    GameAlreadyOver,
    #[error("Invalid board dimensions {rows}x{cols} (each must be within {min}..={max})")]
    InvalidDimensions {
        rows: usize,
        cols: usize,
        min: usize,
        max: usize,
    },
}
