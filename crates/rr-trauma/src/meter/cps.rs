//! Cognitive Paradox Syndrome.
//!
//! CPS is the mind buckling under knowledge it can't hold. Its stage follows
//! the stress value directly: a [`CpsState`] is created from a stress reading
//! and advances whenever stress does.

use serde::{Deserialize, Serialize};

use super::{METER_MAX, METER_MIN, Meter};

/// CPS stages, from lucid to hollow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CpsStage {
    /// 0-19: no symptoms.
    None,
    /// 20-39: headaches and a creeping sense of wrongness.
    WeightOfKnowing,
    /// 40-59: flashes of insight tangled with hallucination.
    GlimmerMadness,
    /// 60-79: panic checks begin. Recovery is no longer assured.
    RuinMadness,
    /// 80-100: the self is gone.
    HollowShell,
}

impl CpsStage {
    /// Dice of disadvantage on logic-based checks.
    pub fn logic_disadvantage(self) -> i32 {
        match self {
            Self::None | Self::WeightOfKnowing => 0,
            Self::GlimmerMadness => 1,
            Self::RuinMadness => 2,
            Self::HollowShell => 3,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::WeightOfKnowing => "Weight of Knowing",
            Self::GlimmerMadness => "Glimmer Madness",
            Self::RuinMadness => "Ruin Madness",
            Self::HollowShell => "Hollow Shell",
        }
    }
}

impl std::fmt::Display for CpsStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

const CPS_STAGES: &[(i32, CpsStage)] = &[
    (0, CpsStage::None),
    (20, CpsStage::WeightOfKnowing),
    (40, CpsStage::GlimmerMadness),
    (60, CpsStage::RuinMadness),
    (80, CpsStage::HollowShell),
];

/// Value at which panic checks start.
pub const PANIC_CHECK_THRESHOLD: i32 = 60;

/// A character's CPS reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub struct CpsState {
    current: i32,
}

impl Meter for CpsState {
    type Stage = CpsStage;

    const NAME: &'static str = "cps";
    const STAGES: &'static [(i32, CpsStage)] = CPS_STAGES;

    fn create(value: i32) -> Self {
        Self {
            current: value.clamp(METER_MIN, METER_MAX),
        }
    }

    fn value(&self) -> i32 {
        self.current
    }

    fn is_terminal(&self) -> bool {
        self.stage() == CpsStage::HollowShell
    }
}

impl CpsState {
    /// No symptoms.
    pub fn lucid() -> Self {
        Self::create(METER_MIN)
    }

    /// The CPS reading that corresponds to `stress`.
    pub fn from_stress(stress: i32) -> Self {
        Self::create(stress)
    }

    /// The current reading.
    pub fn current_value(&self) -> i32 {
        self.current
    }

    /// Fraction of the way to Hollow Shell, 0.0 to 1.0.
    pub fn percentage_to_hollow_shell(&self) -> f64 {
        let threshold = f64::from(CPS_STAGES[CPS_STAGES.len() - 1].0);
        (f64::from(self.current) / threshold).min(1.0)
    }

    /// Panic checks are required from Ruin Madness upward.
    pub fn requires_panic_check(&self) -> bool {
        self.current >= PANIC_CHECK_THRESHOLD
    }

    /// Below Ruin Madness the condition can still be treated.
    pub fn is_recoverable(&self) -> bool {
        self.stage() < CpsStage::RuinMadness
    }

    /// Whether the character is a Hollow Shell.
    pub fn is_hollow_shell(&self) -> bool {
        self.is_terminal()
    }

    /// Dice of disadvantage on logic-based checks.
    pub fn logic_disadvantage(&self) -> i32 {
        self.stage().logic_disadvantage()
    }
}

impl From<i32> for CpsState {
    fn from(value: i32) -> Self {
        Self::create(value)
    }
}

impl From<CpsState> for i32 {
    fn from(state: CpsState) -> Self {
        state.current
    }
}

impl std::fmt::Display for CpsState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CPS: {}/{} [{}]", self.current, METER_MAX, self.stage())?;
        if self.requires_panic_check() {
            write!(f, " [PANIC CHECK]")?;
        }
        Ok(())
    }
}

/// How a CPS stage moved between two stress readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpsStageChange {
    /// Stage before the change.
    pub previous: CpsStage,
    /// Stage after the change.
    pub current: CpsStage,
}

impl CpsStageChange {
    /// Compare the stages two stress readings map to.
    pub fn from_stress_change(previous_stress: i32, new_stress: i32) -> Self {
        Self {
            previous: CpsState::determine_stage(previous_stress),
            current: CpsState::determine_stage(new_stress),
        }
    }

    /// Whether the stage differs at all.
    pub fn stage_changed(&self) -> bool {
        self.previous != self.current
    }

    /// Whether the stage moved upward.
    pub fn worsened(&self) -> bool {
        self.current > self.previous
    }

    /// Crossed into Ruin Madness from below.
    pub fn entered_ruin_madness(&self) -> bool {
        self.previous < CpsStage::RuinMadness && self.current == CpsStage::RuinMadness
    }

    /// Crossed into Hollow Shell from below.
    pub fn entered_hollow_shell(&self) -> bool {
        self.previous < CpsStage::HollowShell && self.current == CpsStage::HollowShell
    }

    /// Entering either of the two stages that end recoverability.
    pub fn is_critical_transition(&self) -> bool {
        self.entered_ruin_madness() || self.entered_hollow_shell()
    }
}

impl std::fmt::Display for CpsStageChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.previous, self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_at_boundaries() {
        let cases = [
            (0, CpsStage::None),
            (19, CpsStage::None),
            (20, CpsStage::WeightOfKnowing),
            (39, CpsStage::WeightOfKnowing),
            (40, CpsStage::GlimmerMadness),
            (59, CpsStage::GlimmerMadness),
            (60, CpsStage::RuinMadness),
            (79, CpsStage::RuinMadness),
            (80, CpsStage::HollowShell),
            (100, CpsStage::HollowShell),
        ];
        for (value, expected) in cases {
            assert_eq!(CpsState::determine_stage(value), expected, "cps {value}");
        }
    }

    #[test]
    fn panic_and_recovery() {
        let glimmer = CpsState::from_stress(59);
        assert!(!glimmer.requires_panic_check());
        assert!(glimmer.is_recoverable());

        let ruin = CpsState::from_stress(60);
        assert!(ruin.requires_panic_check());
        assert!(!ruin.is_recoverable());
        assert!(!ruin.is_terminal());

        assert!(CpsState::from_stress(80).is_hollow_shell());
    }

    #[test]
    fn logic_disadvantage_table() {
        for (value, dice) in [(0, 0), (25, 0), (45, 1), (65, 2), (90, 3)] {
            assert_eq!(CpsState::create(value).logic_disadvantage(), dice);
        }
    }

    #[test]
    fn hollow_shell_progress_caps_at_one() {
        let progress = |v| CpsState::create(v).percentage_to_hollow_shell();
        assert!((progress(40) - 0.5).abs() < f64::EPSILON);
        assert!((progress(100) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stage_change_flags() {
        let change = CpsStageChange::from_stress_change(45, 65);
        assert!(change.stage_changed());
        assert!(change.worsened());
        assert!(change.entered_ruin_madness());
        assert!(!change.entered_hollow_shell());
        assert!(change.is_critical_transition());

        let jump = CpsStageChange::from_stress_change(10, 95);
        assert!(jump.entered_hollow_shell());
        assert!(!jump.entered_ruin_madness());
        assert!(jump.is_critical_transition());

        let within = CpsStageChange::from_stress_change(61, 70);
        assert!(!within.stage_changed());
        assert!(!within.is_critical_transition());

        let down = CpsStageChange::from_stress_change(85, 65);
        assert!(down.stage_changed());
        assert!(!down.worsened());
        assert!(!down.is_critical_transition());
    }

    #[test]
    fn display() {
        assert_eq!(
            CpsState::create(30).to_string(),
            "CPS: 30/100 [Weight of Knowing]"
        );
        assert_eq!(
            CpsState::create(65).to_string(),
            "CPS: 65/100 [Ruin Madness] [PANIC CHECK]"
        );
        assert_eq!(
            CpsStageChange::from_stress_change(45, 65).to_string(),
            "Glimmer Madness -> Ruin Madness"
        );
    }
}
