use fourline_ai::Tier;
use fourline_engine::seat::Seat;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Platform identity of a human player. Opaque to the arena.
pub type PlayerId = String;

/// Someone who can occupy a seat: a human, or the built-in adversary.
///
/// Serialized as `"human:<id>"` or `"adversary:<tier>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Participant {
    Human(PlayerId),
    Adversary(Tier),
}

impl Participant {
    pub fn human(id: impl Into<PlayerId>) -> Self {
        Participant::Human(id.into())
    }

    pub fn is_adversary(&self) -> bool {
        matches!(self, Participant::Adversary(_))
    }

    pub fn human_id(&self) -> Option<&str> {
        match self {
            Participant::Human(id) => Some(id),
            Participant::Adversary(_) => None,
        }
    }

    pub fn tier(&self) -> Option<Tier> {
        match self {
            Participant::Adversary(tier) => Some(*tier),
            Participant::Human(_) => None,
        }
    }

    fn as_str(&self) -> Cow<'_, str> {
        match self {
            Participant::Human(id) => Cow::Owned(format!("human:{id}")),
            Participant::Adversary(tier) => Cow::Owned(format!("adversary:{tier}")),
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid participant: {0}")]
pub struct ParseParticipantError(String);

impl FromStr for Participant {
    type Err = ParseParticipantError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if let Some(id) = raw.strip_prefix("human:") {
            if id.is_empty() {
                return Err(ParseParticipantError(raw.to_string()));
            }
            return Ok(Participant::Human(id.to_string()));
        }
        if let Some(tier) = raw.strip_prefix("adversary:") {
            return tier
                .parse()
                .map(Participant::Adversary)
                .map_err(|_| ParseParticipantError(raw.to_string()));
        }
        Err(ParseParticipantError(raw.to_string()))
    }
}

impl Serialize for Participant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.as_str())
    }
}

impl<'de> Deserialize<'de> for Participant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Seat table: index 0 is seat one, index 1 is seat two.
pub type Seating = [Participant; 2];

/// Coin-flip the original pair into seats.
pub(crate) fn draw_seats<R: Rng + ?Sized>(originals: &Seating, rng: &mut R) -> Seating {
    let [first, second] = originals.clone();
    if rng.random_bool(0.5) {
        [second, first]
    } else {
        [first, second]
    }
}

/// Seat occupied by the human `actor`, if any.
pub(crate) fn seat_of(seating: &Seating, actor: &str) -> Option<Seat> {
    Seat::ALL
        .into_iter()
        .find(|seat| seating[seat.index()].human_id() == Some(actor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn string_form_round_trips() {
        for p in [
            Participant::human("u-123"),
            Participant::Adversary(Tier::Impossible),
        ] {
            let parsed: Participant = p.to_string().parse().expect("parse");
            assert_eq!(parsed, p);
        }
        assert!("human:".parse::<Participant>().is_err());
        assert!("adversary:godlike".parse::<Participant>().is_err());
        assert!("robot".parse::<Participant>().is_err());
    }

    #[test]
    fn serde_uses_the_string_form() {
        let json = serde_json::to_string(&Participant::Adversary(Tier::Hard)).expect("json");
        assert_eq!(json, "\"adversary:hard\"");
        let back: Participant = serde_json::from_str("\"human:alice\"").expect("parse");
        assert_eq!(back, Participant::human("alice"));
    }

    #[test]
    fn draws_keep_both_participants() {
        let originals = [Participant::human("a"), Participant::Adversary(Tier::Medium)];
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let mut swapped = false;
        let mut kept = false;
        for _ in 0..64 {
            let seats = draw_seats(&originals, &mut rng);
            assert!(seats.contains(&originals[0]) && seats.contains(&originals[1]));
            if seats == originals {
                kept = true;
            } else {
                swapped = true;
            }
        }
        assert!(swapped && kept);
    }

    #[test]
    fn finds_the_actor_seat() {
        let seating = [Participant::Adversary(Tier::Random), Participant::human("bob")];
        assert_eq!(seat_of(&seating, "bob"), Some(Seat::Two));
        assert_eq!(seat_of(&seating, "eve"), None);
    }
}
