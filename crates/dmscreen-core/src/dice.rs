//! Dice roll requests and the raw outcome reported by the dice authority.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// The supported polyhedral dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiceKind {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
    D100,
}

impl DiceKind {
    /// All kinds, smallest first.
    pub const ALL: [Self; 7] = [
        Self::D4,
        Self::D6,
        Self::D8,
        Self::D10,
        Self::D12,
        Self::D20,
        Self::D100,
    ];

    /// Number of faces.
    #[must_use]
    pub fn sides(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
        }
    }

    fn from_sides(sides: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.sides() == sides)
    }
}

impl fmt::Display for DiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

impl FromStr for DiceKind {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .strip_prefix(['d', 'D'])
            .and_then(|sides| sides.parse().ok())
            .and_then(Self::from_sides)
            .ok_or_else(|| SessionError::InvalidSpec(format!("unknown die kind: {s}")))
    }
}

/// A roll request: `count` dice of one kind plus a flat modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRollSpec {
    /// Die kind.
    #[serde(rename = "dice_type")]
    pub kind: DiceKind,
    /// Number of dice; must be at least 1 to be evaluated.
    pub count: u32,
    /// Flat modifier added to the sum.
    pub modifier: i32,
}

impl DiceRollSpec {
    /// Creates a roll request.
    #[must_use]
    pub fn new(kind: DiceKind, count: u32, modifier: i32) -> Self {
        Self {
            kind,
            count,
            modifier,
        }
    }
}

impl fmt::Display for DiceRollSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.kind)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}

impl FromStr for DiceRollSpec {
    type Err = SessionError;

    /// Parses roll notation such as `3d20+2`, `d6` or `2d8-1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SessionError::InvalidSpec(format!("unrecognized roll notation: {s}"));
        let notation: String = s.chars().filter(|c| !c.is_whitespace()).collect();

        let split = notation.find(['d', 'D']).ok_or_else(invalid)?;
        let (count, rest) = notation.split_at(split);
        let count = if count.is_empty() {
            1
        } else {
            count.parse().map_err(|_| invalid())?
        };

        let (kind, modifier) = match rest.find(['+', '-']) {
            Some(sign) => {
                let (kind, modifier) = rest.split_at(sign);
                let modifier = modifier
                    .strip_prefix('+')
                    .unwrap_or(modifier)
                    .parse()
                    .map_err(|_| invalid())?;
                (kind, modifier)
            }
            None => (rest, 0),
        };

        Ok(Self::new(kind.parse()?, count, modifier))
    }
}

/// Raw roll outcome as reported by the remote dice authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRoll {
    /// Individual die outcomes.
    pub rolls: Vec<u32>,
    /// The modifier as echoed back.
    pub modifier: i32,
    /// The total the authority computed.
    pub final_total: i64,
}
