//! Stress resistance checks.
//!
//! A character rolls a resistance pool against incoming stress. Net successes
//! map to a reduction percentage:
//!
//! | successes | reduction |
//! |-----------|-----------|
//! | 0         | 0%        |
//! | 1         | 50%       |
//! | 2-3       | 75%       |
//! | 4+        | 100%      |
//!
//! The remaining stress is truncated, never rounded: 15 stress at 50% is 7.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::dice::{DicePool, RollResult};
use crate::error::{MechResult, non_negative};

/// Successes at or above which incoming stress is fully resisted.
pub const FULL_RESISTANCE_SUCCESSES: u32 = 4;

/// Percentage of incoming stress removed by `successes` net successes.
pub fn reduction_percent(successes: u32) -> u32 {
    match successes {
        0 => 0,
        1 => 50,
        2 | 3 => 75,
        _ => 100,
    }
}

/// The outcome of one stress resistance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StressCheckResult {
    successes: u32,
    base_stress: u32,
}

impl StressCheckResult {
    /// Build a result from net successes and the unresisted stress amount.
    ///
    /// Both arguments must be non-negative.
    pub fn create(successes: i32, base_stress: i32) -> MechResult<Self> {
        Ok(Self {
            successes: non_negative("successes", successes)?,
            base_stress: non_negative("base_stress", base_stress)?,
        })
    }

    /// A check that was never rolled: all of `base_stress` goes through.
    pub fn no_resistance(base_stress: i32) -> MechResult<Self> {
        Self::create(0, base_stress)
    }

    /// Resist `base_stress` with an already rolled pool.
    pub fn from_roll(roll: &RollResult, base_stress: u32) -> Self {
        Self {
            successes: roll.net_successes(),
            base_stress,
        }
    }

    /// Roll `pool` and resist `base_stress` with its net successes.
    pub fn roll<R: Rng>(pool: &DicePool, base_stress: u32, rng: &mut R) -> Self {
        let roll = pool.roll(rng);
        let result = Self::from_roll(&roll, base_stress);
        tracing::debug!(
            %roll,
            base_stress,
            final_stress = result.final_stress(),
            "stress resistance rolled"
        );
        result
    }

    /// Net successes scored on the resistance roll.
    pub fn successes(&self) -> u32 {
        self.successes
    }

    /// Stress before resistance.
    pub fn base_stress(&self) -> u32 {
        self.base_stress
    }

    /// Percentage of the base stress removed (0, 50, 75 or 100).
    pub fn reduction_percent(&self) -> u32 {
        reduction_percent(self.successes)
    }

    /// Stress that gets through, truncated toward zero.
    pub fn final_stress(&self) -> u32 {
        let kept = u64::from(100 - self.reduction_percent());
        (u64::from(self.base_stress) * kept / 100) as u32
    }

    /// Stress removed by the check.
    pub fn stress_prevented(&self) -> u32 {
        self.base_stress - self.final_stress()
    }

    /// At least one success was scored.
    pub fn succeeded(&self) -> bool {
        self.successes > 0
    }

    /// Nothing got through.
    pub fn was_fully_resisted(&self) -> bool {
        self.final_stress() == 0
    }

    /// Some, but not all, of the stress was resisted.
    pub fn was_partially_resisted(&self) -> bool {
        self.succeeded() && self.final_stress() > 0
    }
}

impl std::fmt::Display for StressCheckResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} successes: {} -> {} stress (-{}%)",
            self.successes,
            self.base_stress,
            self.final_stress(),
            self.reduction_percent()
        )
    }
}
