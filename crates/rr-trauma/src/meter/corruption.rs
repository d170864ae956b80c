//! Runic Blight Corruption.
//!
//! Unlike stress, corruption is physical and does not recover with rest.
//! It erodes maximum HP and AP, weakens resolve, locks the character out of
//! factions from 50 upward, and at 100 forces a Terminal Error check.

use serde::{Deserialize, Serialize};

use super::{METER_MAX, METER_MIN, Meter, shifted};
use crate::error::TraumaResult;
use rr_mechanics::TerminalErrorResult;

/// Corruption stages, from clean to consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CorruptionStage {
    /// 0-19.
    Uncorrupted,
    /// 20-39.
    Tainted,
    /// 40-59.
    Infected,
    /// 60-79.
    Blighted,
    /// 80-99.
    Corrupted,
    /// 100: Terminal Error.
    Consumed,
}

impl CorruptionStage {
    /// Bonus to technology skills granted by the Blight's affinity for machines.
    pub fn tech_bonus(self) -> i32 {
        match self {
            Self::Uncorrupted | Self::Consumed => 0,
            Self::Tainted => 1,
            Self::Infected | Self::Blighted | Self::Corrupted => 2,
        }
    }

    /// Penalty to social skills as others sense the taint.
    pub fn social_penalty(self) -> i32 {
        -self.tech_bonus()
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Uncorrupted => "Uncorrupted",
            Self::Tainted => "Tainted",
            Self::Infected => "Infected",
            Self::Blighted => "Blighted",
            Self::Corrupted => "Corrupted",
            Self::Consumed => "Consumed",
        }
    }
}

impl std::fmt::Display for CorruptionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

const CORRUPTION_STAGES: &[(i32, CorruptionStage)] = &[
    (0, CorruptionStage::Uncorrupted),
    (20, CorruptionStage::Tainted),
    (40, CorruptionStage::Infected),
    (60, CorruptionStage::Blighted),
    (80, CorruptionStage::Corrupted),
    (100, CorruptionStage::Consumed),
];

/// One-time milestones announced when corruption first rises past them.
pub const CORRUPTION_MILESTONES: [i32; 3] = [25, 50, 75];

/// Corruption at which factions refuse the character.
pub const FACTION_LOCK_THRESHOLD: i32 = 50;

/// Corruption at which mutations become a risk.
pub const MUTATION_RISK_THRESHOLD: i32 = 80;

/// A character's current corruption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub struct CorruptionState {
    current: i32,
}

impl Meter for CorruptionState {
    type Stage = CorruptionStage;

    const NAME: &'static str = "corruption";
    const STAGES: &'static [(i32, CorruptionStage)] = CORRUPTION_STAGES;

    fn create(value: i32) -> Self {
        Self {
            current: value.clamp(METER_MIN, METER_MAX),
        }
    }

    fn value(&self) -> i32 {
        self.current
    }

    fn is_terminal(&self) -> bool {
        self.stage() == CorruptionStage::Consumed
    }
}

impl CorruptionState {
    /// A character untouched by the Blight.
    pub fn uncorrupted() -> Self {
        Self::create(METER_MIN)
    }

    /// The current corruption value.
    pub fn current_corruption(&self) -> i32 {
        self.current
    }

    /// Fraction of the way to Consumed, 0.0 to 1.0.
    pub fn percentage_to_consumption(&self) -> f64 {
        self.percentage()
    }

    /// A full meter demands a mutation check and a Terminal Error check.
    pub fn requires_mutation_check(&self) -> bool {
        self.current >= METER_MAX
    }

    /// Mutations become possible in the Corrupted stage.
    pub fn has_mutation_risk(&self) -> bool {
        self.current >= MUTATION_RISK_THRESHOLD
    }

    /// Factions refuse the character from 50 corruption upward.
    pub fn is_faction_locked(&self) -> bool {
        self.current >= FACTION_LOCK_THRESHOLD
    }

    /// Whether the Blight has touched the character at all.
    pub fn is_uncorrupted(&self) -> bool {
        self.stage() == CorruptionStage::Uncorrupted
    }

    /// Whether the character is Consumed.
    pub fn is_consumed(&self) -> bool {
        self.stage() == CorruptionStage::Consumed
    }

    /// Percentage of maximum HP lost: 5% per full 10 corruption.
    pub fn max_hp_penalty_percent(&self) -> i32 {
        (self.current / 10) * 5
    }

    /// Percentage of maximum AP lost: 5% per full 10 corruption.
    pub fn max_ap_penalty_percent(&self) -> i32 {
        (self.current / 10) * 5
    }

    /// Dice removed from Resolve pools: one per full 20 corruption.
    pub fn resolve_dice_penalty(&self) -> i32 {
        self.current / 20
    }

    /// Bonus to technology skills at this stage.
    pub fn tech_bonus(&self) -> i32 {
        self.stage().tech_bonus()
    }

    /// Penalty to social skills at this stage.
    pub fn social_penalty(&self) -> i32 {
        self.stage().social_penalty()
    }

    /// Replace the corruption value outright (clamped).
    pub fn with_corruption(&self, corruption: i32) -> Self {
        Self::create(corruption)
    }

    /// Add `amount` corruption. Negative amounts are rejected.
    pub fn with_corruption_added(&self, amount: i32) -> TraumaResult<Self> {
        shifted(*self, "with_corruption_added", amount, true)
    }

    /// Remove `amount` corruption. Negative amounts are rejected.
    pub fn with_corruption_reduced(&self, amount: i32) -> TraumaResult<Self> {
        shifted(*self, "with_corruption_reduced", amount, false)
    }

    /// Corruption after a Terminal Error check: 99 on survival, 100 otherwise.
    pub fn after_terminal_error(&self, result: &TerminalErrorResult) -> Self {
        Self::create(result.final_corruption())
    }

    /// Milestones passed on the way from `self` up to `next`, lowest first.
    pub fn milestones_crossed(&self, next: &Self) -> Vec<i32> {
        CORRUPTION_MILESTONES
            .iter()
            .copied()
            .filter(|&m| self.current < m && next.current >= m)
            .collect()
    }
}

impl From<i32> for CorruptionState {
    fn from(value: i32) -> Self {
        Self::create(value)
    }
}

impl From<CorruptionState> for i32 {
    fn from(state: CorruptionState) -> Self {
        state.current
    }
}

impl std::fmt::Display for CorruptionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Corruption: {}/{} [{}]",
            self.current,
            METER_MAX,
            self.stage()
        )?;
        if self.requires_mutation_check() {
            write!(f, " [MUTATION CHECK REQUIRED]")
        } else if self.has_mutation_risk() {
            write!(f, " [Mutation Risk]")
        } else {
            Ok(())
        }
    }
}
