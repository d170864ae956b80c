//! Psychic Stress.
//!
//! Stress climbs in 20-point bands. Each band costs one point of Defense,
//! the top two impose disadvantage on skill checks, and a full meter forces a
//! Trauma Check.

use serde::{Deserialize, Serialize};

use super::{METER_MAX, METER_MIN, Meter, shifted};
use crate::config::EconomyConfig;
use crate::error::TraumaResult;

/// Stress bands, from calm to breaking point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StressThreshold {
    /// 0-19.
    Calm,
    /// 20-39.
    Uneasy,
    /// 40-59.
    Anxious,
    /// 60-79.
    Panicked,
    /// 80-99.
    Breaking,
    /// 100: a Trauma Check is due.
    Trauma,
}

impl StressThreshold {
    /// Defense lost in this band: 0 when calm up to 5 at Trauma.
    pub fn defense_penalty(self) -> i32 {
        self as i32
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Calm => "Calm",
            Self::Uneasy => "Uneasy",
            Self::Anxious => "Anxious",
            Self::Panicked => "Panicked",
            Self::Breaking => "Breaking",
            Self::Trauma => "Trauma",
        }
    }
}

impl std::fmt::Display for StressThreshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

const STRESS_STAGES: &[(i32, StressThreshold)] = &[
    (0, StressThreshold::Calm),
    (20, StressThreshold::Uneasy),
    (40, StressThreshold::Anxious),
    (60, StressThreshold::Panicked),
    (80, StressThreshold::Breaking),
    (100, StressThreshold::Trauma),
];

/// A character's current Psychic Stress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub struct StressState {
    current: i32,
}

impl Meter for StressState {
    type Stage = StressThreshold;

    const NAME: &'static str = "stress";
    const STAGES: &'static [(i32, StressThreshold)] = STRESS_STAGES;

    fn create(value: i32) -> Self {
        Self {
            current: value.clamp(METER_MIN, METER_MAX),
        }
    }

    fn value(&self) -> i32 {
        self.current
    }

    fn is_terminal(&self) -> bool {
        self.current >= METER_MAX
    }
}

impl StressState {
    /// A character with no stress.
    pub fn calm() -> Self {
        Self::create(METER_MIN)
    }

    /// The current stress value.
    pub fn current_stress(&self) -> i32 {
        self.current
    }

    /// The stress band of the current value.
    pub fn threshold(&self) -> StressThreshold {
        self.stage()
    }

    /// Defense lost to stress (0-5).
    pub fn defense_penalty(&self) -> i32 {
        self.threshold().defense_penalty()
    }

    /// Skill checks are made at disadvantage from Breaking upward.
    pub fn has_skill_disadvantage(&self) -> bool {
        self.threshold() >= StressThreshold::Breaking
    }

    /// A full meter forces a Trauma Check.
    pub fn requires_trauma_check(&self) -> bool {
        self.current >= METER_MAX
    }

    /// In the lowest band.
    pub fn is_calm(&self) -> bool {
        self.threshold() == StressThreshold::Calm
    }

    /// In the Breaking band or worse.
    pub fn is_breaking(&self) -> bool {
        self.threshold() >= StressThreshold::Breaking
    }

    /// Replace the stress value outright (clamped).
    pub fn with_stress(&self, stress: i32) -> Self {
        Self::create(stress)
    }

    /// Add `amount` stress. Negative amounts are rejected.
    pub fn with_stress_added(&self, amount: i32) -> TraumaResult<Self> {
        shifted(*self, "with_stress_added", amount, true)
    }

    /// Remove `amount` stress. Negative amounts are rejected.
    pub fn with_stress_reduced(&self, amount: i32) -> TraumaResult<Self> {
        shifted(*self, "with_stress_reduced", amount, false)
    }

    /// Where stress settles once a Trauma Check has been made.
    pub fn after_trauma_check(&self, passed: bool, config: &EconomyConfig) -> Self {
        if passed {
            Self::create(config.trauma_pass_reset)
        } else {
            Self::create(config.trauma_fail_reset)
        }
    }
}

impl From<i32> for StressState {
    fn from(value: i32) -> Self {
        Self::create(value)
    }
}

impl From<StressState> for i32 {
    fn from(state: StressState) -> Self {
        state.current
    }
}

impl std::fmt::Display for StressState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stress: {}/{} [{}] (Def: -{})",
            self.current,
            METER_MAX,
            self.threshold(),
            self.defense_penalty()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TraumaError;

    #[test]
    fn create_clamps() {
        assert_eq!(StressState::create(-10).current_stress(), 0);
        assert_eq!(StressState::create(150).current_stress(), 100);
        assert_eq!(StressState::create(42).current_stress(), 42);
    }

    #[test]
    fn thresholds_at_boundaries() {
        let cases = [
            (0, StressThreshold::Calm),
            (19, StressThreshold::Calm),
            (20, StressThreshold::Uneasy),
            (39, StressThreshold::Uneasy),
            (40, StressThreshold::Anxious),
            (59, StressThreshold::Anxious),
            (60, StressThreshold::Panicked),
            (79, StressThreshold::Panicked),
            (80, StressThreshold::Breaking),
            (99, StressThreshold::Breaking),
            (100, StressThreshold::Trauma),
        ];
        for (value, expected) in cases {
            let stage = StressState::determine_stage(value);
            assert_eq!(stage, expected, "stress {value}");
            assert_eq!(StressState::create(value).threshold(), expected);
        }
    }

    #[test]
    fn defense_penalty_per_band() {
        for (value, penalty) in [(0, 0), (20, 1), (40, 2), (65, 3), (80, 4), (100, 5)] {
            assert_eq!(StressState::create(value).defense_penalty(), penalty);
        }
    }

    #[test]
    fn skill_disadvantage_from_breaking() {
        assert!(!StressState::create(79).has_skill_disadvantage());
        assert!(StressState::create(80).has_skill_disadvantage());
        assert!(StressState::create(80).is_breaking());
    }

    #[test]
    fn trauma_check_only_when_full() {
        assert!(!StressState::create(99).requires_trauma_check());
        assert!(StressState::create(100).requires_trauma_check());
        assert!(StressState::create(100).is_terminal());
        assert!(!StressState::create(99).is_terminal());
    }

    #[test]
    fn added_and_reduced_return_new_values() {
        let s = StressState::create(30);
        let up = s.with_stress_added(25).unwrap();
        assert_eq!(up.current_stress(), 55);
        assert_eq!(s.current_stress(), 30);
        assert_eq!(s.with_stress_reduced(40).unwrap().current_stress(), 0);
        assert_eq!(s.with_stress(75).current_stress(), 75);
    }

    #[test]
    fn negative_deltas_fail_fast() {
        let s = StressState::create(30);
        assert_eq!(
            s.with_stress_added(-5),
            Err(TraumaError::NegativeAmount {
                operation: "with_stress_added",
                amount: -5
            })
        );
        assert!(s.with_stress_reduced(-5).is_err());
    }

    #[test]
    fn trauma_check_reset() {
        let cfg = EconomyConfig::default();
        let s = StressState::create(100);
        assert_eq!(s.after_trauma_check(true, &cfg).current_stress(), 75);
        assert_eq!(s.after_trauma_check(false, &cfg).current_stress(), 50);
    }

    #[test]
    fn calm_default() {
        assert_eq!(StressState::calm(), StressState::default());
        assert!(StressState::calm().is_calm());
    }

    #[test]
    fn serde_clamps_on_the_way_in() {
        let s: StressState = serde_json::from_str("250").unwrap();
        assert_eq!(s.current_stress(), 100);
        let json = serde_json::to_string(&StressState::create(65)).unwrap();
        assert_eq!(json, "65");
    }

    #[test]
    fn display() {
        assert_eq!(
            StressState::create(65).to_string(),
            "Stress: 65/100 [Panicked] (Def: -3)"
        );
    }
}
