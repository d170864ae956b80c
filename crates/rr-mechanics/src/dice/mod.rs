//! Dice types, pools, and rolling.
//!
//! Pools are homogeneous: every die in a pool has the same number of sides.
//! A roll counts *successes* (faces at or above the pool's success face) and
//! *botches* (faces equal to the botch face, always 1). How botches turn into
//! a fumble is governed by the pool's [`FumbleRule`].

pub mod pool;
pub mod roll;

pub use pool::DicePool;
pub use roll::RollResult;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// Face value that counts as a botch on every die.
pub const BOTCH_FACE: u32 = 1;

/// The die sizes a pool may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Die {
    /// d6, for quick minor checks.
    D6,
    /// d8.
    D8,
    /// d10, the check die every resistance and contest uses by default.
    D10,
    /// d12.
    D12,
    /// d20.
    D20,
}

impl Die {
    /// Every supported die, smallest first.
    pub const ALL: [Self; 5] = [Self::D6, Self::D8, Self::D10, Self::D12, Self::D20];

    /// Number of faces.
    pub fn sides(self) -> u32 {
        match self {
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
        }
    }

    /// The die with exactly `sides` faces.
    pub fn from_sides(sides: u32) -> MechResult<Self> {
        Self::ALL
            .into_iter()
            .find(|die| die.sides() == sides)
            .ok_or(MechError::InvalidDie(sides))
    }

    /// The lowest face that scores a success: two below the maximum.
    ///
    /// On a d10 this is the familiar "8 or better".
    pub fn default_success_face(self) -> u32 {
        self.sides() - 2
    }
}

impl FromStr for Die {
    type Err = MechError;

    /// Parse `"d10"` or `"D10"`.
    fn from_str(tag: &str) -> MechResult<Self> {
        let sides = tag
            .trim()
            .strip_prefix(['d', 'D'])
            .and_then(|n| n.parse::<u32>().ok())
            .ok_or_else(|| MechError::UnknownDieTag(tag.to_string()))?;
        Self::from_sides(sides)
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

/// How botches on a roll turn into a fumble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FumbleRule {
    /// Any botch face fumbles the whole roll, regardless of successes.
    AnyBotch,
    /// A roll fumbles when it shows at least one botch and no successes.
    BotchWithoutSuccess,
    /// Rolls never fumble; botches only cancel successes.
    Never,
}

impl FumbleRule {
    /// The default rule for a pool of `count` dice: a lone die fumbles on
    /// any botch, larger pools only when nothing succeeded.
    pub fn for_count(count: u32) -> Self {
        if count == 1 {
            Self::AnyBotch
        } else {
            Self::BotchWithoutSuccess
        }
    }

    /// Apply the rule to tallied successes and botches.
    pub fn is_fumble(self, successes: u32, botches: u32) -> bool {
        match self {
            Self::AnyBotch => botches > 0,
            Self::BotchWithoutSuccess => botches > 0 && successes == 0,
            Self::Never => false,
        }
    }
}
