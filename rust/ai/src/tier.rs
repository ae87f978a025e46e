use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Adversary strength, weakest first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Random,
    Medium,
    Hard,
    Impossible,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Random, Tier::Medium, Tier::Hard, Tier::Impossible];

    /// 0 for `Random` up to 3 for `Impossible`.
    pub fn level(self) -> u8 {
        match self {
            Tier::Random => 0,
            Tier::Medium => 1,
            Tier::Hard => 2,
            Tier::Impossible => 3,
        }
    }

    pub fn from_level(level: u8) -> Option<Tier> {
        Tier::ALL.get(usize::from(level)).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Random => "random",
            Tier::Medium => "medium",
            Tier::Hard => "hard",
            Tier::Impossible => "impossible",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown adversary tier: {0} (expected random|medium|hard|impossible or 0-3)")]
pub struct UnknownTier(pub String);

impl FromStr for Tier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(level) = trimmed.parse::<u8>() {
            return Tier::from_level(level).ok_or_else(|| UnknownTier(s.to_string()));
        }
        Tier::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownTier(s.to_string()))
    }
}
