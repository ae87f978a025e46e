//! The four adversary tiers.

use crate::tactics::{blocking_column, random_column, tactical_column, winning_column};
use crate::{Adversary, Tier};
use fourline_engine::board::Board;
use fourline_engine::seat::Seat;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::sync::Mutex;

/// Seeded RNG shared by every tier for its random fallback.
#[derive(Debug)]
struct Dice(Mutex<ChaCha20Rng>);

impl Dice {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_os_rng(),
        };
        Self(Mutex::new(rng))
    }

    fn roll(&self, board: &Board) -> Option<usize> {
        // The RNG holds no invariant a panicking holder could break.
        let mut rng = self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        random_column(board, &mut *rng)
    }
}

/// Tier 0: any open column, uniformly.
#[derive(Debug)]
pub struct RandomAdversary {
    dice: Dice,
}

impl RandomAdversary {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            dice: Dice::new(seed),
        }
    }
}

impl Adversary for RandomAdversary {
    fn choose_column(&self, board: &Board, _seat: Seat) -> Option<usize> {
        self.dice.roll(board)
    }

    fn name(&self) -> &str {
        "RandomAdversary"
    }

    fn tier(&self) -> Tier {
        Tier::Random
    }
}

/// Tier 1: takes a win, blocks a loss, otherwise plays randomly.
#[derive(Debug)]
pub struct MediumAdversary {
    dice: Dice,
}

impl MediumAdversary {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            dice: Dice::new(seed),
        }
    }
}

impl Adversary for MediumAdversary {
    fn choose_column(&self, board: &Board, seat: Seat) -> Option<usize> {
        winning_column(board, seat)
            .or_else(|| blocking_column(board, seat))
            .or_else(|| self.dice.roll(board))
    }

    fn name(&self) -> &str {
        "MediumAdversary"
    }

    fn tier(&self) -> Tier {
        Tier::Medium
    }
}

/// Tier 2: win, block, then the most central column that does not hand the
/// opponent an immediate win.
#[derive(Debug)]
pub struct HardAdversary {
    dice: Dice,
}

impl HardAdversary {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            dice: Dice::new(seed),
        }
    }
}

impl Adversary for HardAdversary {
    fn choose_column(&self, board: &Board, seat: Seat) -> Option<usize> {
        tactical_column(board, seat).or_else(|| self.dice.roll(board))
    }

    fn name(&self) -> &str {
        "HardAdversary"
    }

    fn tier(&self) -> Tier {
        Tier::Hard
    }
}

/// Tier 3. Shares [`HardAdversary`]'s one-ply search: win, block, then the
/// first safe column from the center outward.
#[derive(Debug)]
pub struct ImpossibleAdversary {
    dice: Dice,
}

impl ImpossibleAdversary {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            dice: Dice::new(seed),
        }
    }
}

impl Adversary for ImpossibleAdversary {
    fn choose_column(&self, board: &Board, seat: Seat) -> Option<usize> {
        tactical_column(board, seat).or_else(|| self.dice.roll(board))
    }

    fn name(&self) -> &str {
        "ImpossibleAdversary"
    }

    fn tier(&self) -> Tier {
        Tier::Impossible
    }
}
