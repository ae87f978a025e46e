//! # fourline-ai: Built-in Adversaries
//!
//! Move selection for the computer-controlled seat. Four tiers of increasing
//! strength share one interface, [`Adversary`], and a set of one-ply probes in
//! [`tactics`].
//!
//! ## Core Components
//!
//! - [`Adversary`] - Trait every tier implements
//! - [`Tier`] - Strength selector, parsed from `random|medium|hard|impossible` or `0..=3`
//! - [`strategies`] - The four tier implementations
//! - [`tactics`] - Win, block and safety probes run on board copies
//! - [`create_adversary`] - Factory building a boxed adversary for a tier
//!
//! ## Quick Start
//!
//! ```rust
//! use fourline_ai::{create_adversary, Tier};
//! use fourline_engine::board::Board;
//! use fourline_engine::seat::Seat;
//!
//! let adversary = create_adversary(Tier::Medium, Some(42));
//!
//! let mut board = Board::standard();
//! for col in 0..3 {
//!     board.drop_piece(col, Seat::One).expect("drop");
//! }
//!
//! // Seat one threatens column 3; the medium tier blocks it.
//! assert_eq!(adversary.choose_column(&board, Seat::Two), Some(3));
//! ```
//!
//! ## Tiers
//!
//! | tier         | behaviour                                                         |
//! |--------------|-------------------------------------------------------------------|
//! | `random`     | uniform over open columns                                         |
//! | `medium`     | win, else block, else random                                      |
//! | `hard`       | win, else block, else first safe column center-out, else random   |
//! | `impossible` | same as `hard`                                                    |

use fourline_engine::board::Board;
use fourline_engine::seat::Seat;

pub mod strategies;
pub mod tactics;
mod tier;

pub use strategies::{HardAdversary, ImpossibleAdversary, MediumAdversary, RandomAdversary};
pub use tier::{Tier, UnknownTier};

/// Interface for computer-controlled seats.
///
/// Implementations read the board through a shared reference and never
/// mutate it; any probing happens on private copies. That lets a caller take
/// a snapshot under a session lock, release the lock, and think.
///
/// # Example Implementation
///
/// ```rust
/// use fourline_ai::{Adversary, Tier};
/// use fourline_engine::board::Board;
/// use fourline_engine::seat::Seat;
///
/// struct Leftmost;
///
/// impl Adversary for Leftmost {
///     fn choose_column(&self, board: &Board, _seat: Seat) -> Option<usize> {
///         board.legal_columns().first().copied()
///     }
///
///     fn name(&self) -> &str {
///         "Leftmost"
///     }
///
///     fn tier(&self) -> Tier {
///         Tier::Random
///     }
/// }
/// ```
pub trait Adversary: Send + Sync {
    /// Pick a column for `seat` to play.
    ///
    /// Returns `None` only when every column is full. A returned column is
    /// always open.
    fn choose_column(&self, board: &Board, seat: Seat) -> Option<usize>;

    /// Name of this implementation, for logs.
    fn name(&self) -> &str;

    fn tier(&self) -> Tier;
}

/// Build the adversary for `tier`.
///
/// `seed` makes the random fallback reproducible; `None` seeds from the OS.
///
/// # Example
///
/// ```rust
/// use fourline_ai::{create_adversary, Tier};
///
/// let ai = create_adversary(Tier::Hard, None);
/// assert_eq!(ai.name(), "HardAdversary");
/// assert_eq!(ai.tier(), Tier::Hard);
/// ```
pub fn create_adversary(tier: Tier, seed: Option<u64>) -> Box<dyn Adversary> {
    match tier {
        Tier::Random => Box::new(RandomAdversary::new(seed)),
        Tier::Medium => Box::new(MediumAdversary::new(seed)),
        Tier::Hard => Box::new(HardAdversary::new(seed)),
        Tier::Impossible => Box::new(ImpossibleAdversary::new(seed)),
    }
}
