use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two logical slots at the board.
///
/// Seat one always moves first. Which real participant sits where is decided
/// by the session layer; the engine only knows seats.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    One,
    Two,
}

impl Seat {
    pub const ALL: [Seat; 2] = [Seat::One, Seat::Two];

    /// The seat that moves after this one.
    pub fn opponent(self) -> Seat {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    /// 1 or 2, matching the numbering used in snapshots.
    pub fn number(self) -> u8 {
        match self {
            Seat::One => 1,
            Seat::Two => 2,
        }
    }

    pub fn from_number(n: u8) -> Option<Seat> {
        match n {
            1 => Some(Seat::One),
            2 => Some(Seat::Two),
            _ => None,
        }
    }

    /// Zero-based index, handy for `[T; 2]` seat tables.
    pub fn index(self) -> usize {
        usize::from(self.number() - 1)
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seat {}", self.number())
    }
}

/// Owner of a single board cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Empty,
    Seat1,
    Seat2,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn seat(self) -> Option<Seat> {
        match self {
            Cell::Empty => None,
            Cell::Seat1 => Some(Seat::One),
            Cell::Seat2 => Some(Seat::Two),
        }
    }
}

impl From<Seat> for Cell {
    fn from(seat: Seat) -> Self {
        match seat {
            Seat::One => Cell::Seat1,
            Seat::Two => Cell::Seat2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_is_an_involution() {
        for seat in Seat::ALL {
            assert_ne!(seat.opponent(), seat);
            assert_eq!(seat.opponent().opponent(), seat);
        }
    }

    #[test]
    fn numbering_round_trips_and_rejects_zero() {
        assert_eq!(Seat::from_number(1), Some(Seat::One));
        assert_eq!(Seat::from_number(2), Some(Seat::Two));
        assert_eq!(Seat::from_number(0), None);
        assert_eq!(Seat::Two.index(), 1);
    }

    #[test]
    fn cell_knows_its_owner() {
        assert_eq!(Cell::from(Seat::Two).seat(), Some(Seat::Two));
        assert!(Cell::default().is_empty());
        assert_eq!(Cell::Empty.seat(), None);
    }
}
