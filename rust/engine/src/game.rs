use crate::board::{Board, Position};
use crate::errors::GameError;
use crate::seat::Seat;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Why a game ended without a winning run.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForfeitReason {
    /// The player gave up explicitly.
    Resigned,
    /// The turn timer ran out.
    TimedOut,
}

/// Where a game stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Won { seat: Seat, cells: Vec<Position> },
    Draw,
    Forfeited { winner: Seat, reason: ForfeitReason },
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Winning seat, `None` while running or after a draw.
    pub fn winner(&self) -> Option<Seat> {
        match self {
            GameStatus::Won { seat, .. } => Some(*seat),
            GameStatus::Forfeited { winner, .. } => Some(*winner),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }
}

/// Result of an accepted move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoveOutcome {
    Placed { row: usize, col: usize },
    Won { seat: Seat, cells: Vec<Position> },
    Draw,
}

impl MoveOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, MoveOutcome::Placed { .. })
    }
}

/// Board plus turn bookkeeping for a single game.
///
/// `generation` counts accepted moves since the last reset. Callers that
/// schedule work for "the current turn" stamp it with the generation and
/// compare before acting.
///
/// # Examples
///
/// ```
/// use fourline_engine::game::{Game, MoveOutcome};
/// use fourline_engine::seat::Seat;
///
/// let mut game = Game::standard();
/// let outcome = game.apply_move(3).expect("legal move");
/// assert_eq!(outcome, MoveOutcome::Placed { row: 5, col: 3 });
/// assert_eq!(game.turn(), Seat::Two);
/// assert_eq!(game.generation(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    turn: Seat,
    generation: u64,
    status: GameStatus,
    last_move_at: Option<DateTime<Utc>>,
}

impl Game {
    pub fn new(rows: usize, cols: usize) -> Result<Self, GameError> {
        Ok(Self::from_board(Board::new(rows, cols)?))
    }

    pub fn standard() -> Self {
        Self::from_board(Board::standard())
    }

    fn from_board(board: Board) -> Self {
        Self {
            board,
            turn: Seat::One,
            generation: 0,
            status: GameStatus::InProgress,
            last_move_at: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Seat {
        self.turn
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn winner(&self) -> Option<Seat> {
        self.status.winner()
    }

    /// Empty unless the game was won on the board.
    pub fn winning_cells(&self) -> &[Position] {
        match &self.status {
            GameStatus::Won { cells, .. } => cells,
            _ => &[],
        }
    }

    pub fn last_move_at(&self) -> Option<DateTime<Utc>> {
        self.last_move_at
    }

    /// Drop a piece for the seat on turn.
    ///
    /// A full or out-of-range column is rejected before anything changes.
    /// Otherwise the generation advances, and the turn flips only if the game
    /// goes on.
    pub fn apply_move(&mut self, col: usize) -> Result<MoveOutcome, GameError> {
        if self.is_over() {
            return Err(GameError::GameAlreadyOver);
        }

        let mover = self.turn;
        let row = self.board.drop_piece(col, mover)?;
        self.generation += 1;
        self.last_move_at = Some(Utc::now());

        if let Some(cells) = self.board.winning_run(row, col) {
            self.status = GameStatus::Won {
                seat: mover,
                cells: cells.clone(),
            };
            return Ok(MoveOutcome::Won { seat: mover, cells });
        }

        if self.board.is_full() {
            self.status = GameStatus::Draw;
            return Ok(MoveOutcome::Draw);
        }

        self.turn = mover.opponent();
        Ok(MoveOutcome::Placed { row, col })
    }

    /// End the game in favour of `loser`'s opponent. Returns the winner.
    pub fn forfeit(&mut self, loser: Seat, reason: ForfeitReason) -> Result<Seat, GameError> {
        if self.is_over() {
            return Err(GameError::GameAlreadyOver);
        }
        let winner = loser.opponent();
        self.status = GameStatus::Forfeited { winner, reason };
        Ok(winner)
    }

    /// Empty board, seat one to move, generation zero.
    pub fn reset(&mut self) {
        self.board.clear();
        self.turn = Seat::One;
        self.generation = 0;
        self.status = GameStatus::InProgress;
        self.last_move_at = None;
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::standard()
    }
}
