//! # fourline-engine: Gravity Grid Game Core
//!
//! Board representation, move processing and win detection for two-seat
//! "connect four" style games on boards of any size between
//! [`board::MIN_DIMENSION`] and [`board::MAX_DIMENSION`]. The run needed to win
//! is always [`board::CONNECT_LENGTH`], whatever the board size.
//!
//! ## Core Modules
//!
//! - [`board`] - Grid of cells, lowest-empty-row lookup, run detection, win probes
//! - [`game`] - Move processor: turn, generation counter and terminal status
//! - [`seat`] - Seats and cell owners
//! - [`errors`] - Error types for board and game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use fourline_engine::game::{Game, MoveOutcome};
//! use fourline_engine::seat::Seat;
//!
//! let mut game = Game::standard();
//! // Seat one stacks column 3, seat two answers in column 0
//! for col in [3, 0, 3, 0, 3, 0] {
//!     game.apply_move(col).expect("legal move");
//! }
//! match game.apply_move(3).expect("legal move") {
//!     MoveOutcome::Won { seat, cells } => {
//!         assert_eq!(seat, Seat::One);
//!         assert_eq!(cells.len(), 4);
//!     }
//!     other => panic!("expected a win, got {:?}", other),
//! }
//! ```
//!
//! ## Probing Moves
//!
//! [`board::Board::would_win`] drops a piece, checks for a run and removes it
//! again. It borrows the board mutably, so run it on a copy when the original
//! is shared:
//!
//! ```rust
//! use fourline_engine::board::Board;
//! use fourline_engine::seat::Seat;
//!
//! let mut board = Board::standard();
//! for col in 0..3 {
//!     board.drop_piece(col, Seat::Two).expect("drop");
//! }
//! let mut scratch = board.clone();
//! assert!(scratch.would_win(3, Seat::Two));
//! assert_eq!(scratch, board);
//! ```

pub mod board;
pub mod errors;
pub mod game;
pub mod seat;

pub use board::{Board, Position, CONNECT_LENGTH};
pub use errors::GameError;
pub use game::{ForfeitReason, Game, GameStatus, MoveOutcome};
pub use seat::{Cell, Seat};
