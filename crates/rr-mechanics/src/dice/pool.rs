//! Dice pool construction and rolling.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::roll::RollResult;
use super::{BOTCH_FACE, Die, FumbleRule};
use crate::error::{MechError, MechResult};

/// A pool of identical dice rolled together and counted for successes.
///
/// An empty pool is unrepresentable: [`DicePool::new`] rejects a zero count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DicePool {
    die: Die,
    count: u32,
    success_face: u32,
    fumble_rule: FumbleRule,
}

impl DicePool {
    /// Create a pool of `count` dice using the die's default success face
    /// and the default fumble rule for that pool size.
    pub fn new(die: Die, count: u32) -> MechResult<Self> {
        if count == 0 {
            return Err(MechError::EmptyPool);
        }
        Ok(Self {
            die,
            count,
            success_face: die.default_success_face(),
            fumble_rule: FumbleRule::for_count(count),
        })
    }

    /// A pool of d10s, the standard resistance and check pool.
    pub fn d10(count: u32) -> MechResult<Self> {
        Self::new(Die::D10, count)
    }

    /// Override the lowest face that counts as a success.
    ///
    /// The face must be above the botch face and no higher than the die allows.
    pub fn with_success_face(mut self, face: u32) -> MechResult<Self> {
        let sides = self.die.sides();
        if face <= BOTCH_FACE || face > sides {
            return Err(MechError::InvalidFace { value: face, sides });
        }
        self.success_face = face;
        Ok(self)
    }

    /// Override how botches turn into a fumble.
    pub fn with_fumble_rule(mut self, rule: FumbleRule) -> Self {
        self.fumble_rule = rule;
        self
    }

    /// The die type in this pool.
    pub fn die(&self) -> Die {
        self.die
    }

    /// How many dice are in the pool (always at least one).
    pub fn count(&self) -> u32 {
        self.count
    }

    /// The lowest face that counts as a success.
    pub fn success_face(&self) -> u32 {
        self.success_face
    }

    /// The fumble rule applied to rolls of this pool.
    pub fn fumble_rule(&self) -> FumbleRule {
        self.fumble_rule
    }

    /// Roll every die in the pool using the injected RNG.
    pub fn roll<R: Rng>(&self, rng: &mut R) -> RollResult {
        let sides = self.die.sides();
        let faces = (0..self.count)
            .map(|_| rng.random_range(1..=sides))
            .collect();
        RollResult::new_unchecked(*self, faces)
    }
}

impl std::fmt::Display for DicePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{} ({}+)", self.count, self.die, self.success_face)
    }
}
