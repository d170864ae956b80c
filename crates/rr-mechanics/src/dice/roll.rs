//! Dice roll results and success counting.

use serde::{Deserialize, Serialize};

use super::BOTCH_FACE;
use super::pool::DicePool;
use crate::error::{MechError, MechResult};
use crate::resolution::ContestRoll;

/// The faces rolled for a pool, with successes and botches derived on demand.
///
/// Faces are fixed at construction. Re-rolling produces a new result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    pool: DicePool,
    faces: Vec<u32>,
}

impl RollResult {
    /// Build a result from faces rolled elsewhere (a UI, a server, a test).
    ///
    /// There must be exactly one face per die, each within `1..=sides`.
    pub fn from_values(pool: DicePool, faces: Vec<u32>) -> MechResult<Self> {
        if faces.len() != pool.count() as usize {
            return Err(MechError::FaceCountMismatch {
                expected: pool.count(),
                actual: faces.len(),
            });
        }
        let sides = pool.die().sides();
        if let Some(&value) = faces.iter().find(|&&v| v == 0 || v > sides) {
            return Err(MechError::InvalidFace { value, sides });
        }
        Ok(Self { pool, faces })
    }

    pub(crate) fn new_unchecked(pool: DicePool, faces: Vec<u32>) -> Self {
        Self { pool, faces }
    }

    /// The pool that produced this roll.
    pub fn pool(&self) -> &DicePool {
        &self.pool
    }

    /// Individual face values, in roll order.
    pub fn faces(&self) -> &[u32] {
        &self.faces
    }

    /// Dice showing the success face or better.
    pub fn successes(&self) -> u32 {
        let face = self.pool.success_face();
        self.faces.iter().filter(|&&v| v >= face).count() as u32
    }

    /// Dice showing the botch face.
    pub fn botches(&self) -> u32 {
        self.faces.iter().filter(|&&v| v == BOTCH_FACE).count() as u32
    }

    /// Whether the pool's fumble rule turns this roll into a fumble.
    pub fn is_fumble(&self) -> bool {
        self.pool
            .fumble_rule()
            .is_fumble(self.successes(), self.botches())
    }

    /// Successes minus botches, floored at zero. A fumble always nets zero.
    pub fn net_successes(&self) -> u32 {
        if self.is_fumble() {
            return 0;
        }
        self.successes().saturating_sub(self.botches())
    }

    /// Condense the roll into what a contested check compares.
    pub fn contest_roll(&self) -> ContestRoll {
        ContestRoll {
            net_successes: self.net_successes(),
            is_fumble: self.is_fumble(),
        }
    }

    /// Sum of all faces.
    pub fn total(&self) -> u32 {
        self.faces.iter().sum()
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.faces.iter().map(u32::to_string).collect();
        write!(f, "[{}] = {} net", values.join(", "), self.net_successes())?;
        if self.is_fumble() {
            write!(f, " (fumble)")?;
        }
        Ok(())
    }
}
