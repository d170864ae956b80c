//! Stress gain and rest recovery.

use rand::Rng;
use rr_mechanics::{DicePool, StressCheckResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::EconomyConfig;
use crate::error::{TraumaResult, require_non_negative};
use crate::meter::{CpsStageChange, CpsState, Meter, StressState, StressThreshold};

/// Where incoming stress came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StressSource {
    /// Violence, wounds, a fallen ally.
    Combat,
    /// Dark places and the unknown.
    Exploration,
    /// Weather, hunger, hostile terrain.
    Environmental,
    /// Forbidden knowledge and heretical abilities.
    Heretical,
    /// Story events.
    Narrative,
    /// Psychic fallout from Blight corruption.
    Corruption,
    /// The strain of channeling an apotheosis.
    ApotheosisStrain,
}

impl std::fmt::Display for StressSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// The kinds of rest that recover stress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RestType {
    /// A brief breather: WILL x short multiplier.
    Short,
    /// A full night: WILL x long multiplier.
    Long,
    /// A true sanctuary clears all stress.
    Sanctuary,
    /// A story milestone: a flat amount.
    Milestone,
}

impl RestType {
    /// Stress this rest removes for a character with `will`.
    ///
    /// Sanctuary always clears the meter, so its amount is the current stress.
    pub fn recovery_amount(self, will: i32, current: i32, config: &EconomyConfig) -> i32 {
        match self {
            Self::Short => will.saturating_mul(config.short_rest_multiplier),
            Self::Long => will.saturating_mul(config.long_rest_multiplier),
            Self::Sanctuary => current,
            Self::Milestone => config.milestone_recovery,
        }
    }
}

impl std::fmt::Display for RestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// What one application of stress did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StressApplication {
    /// Stress before.
    pub previous: StressState,
    /// Stress after.
    pub current: StressState,
    /// What caused it.
    pub source: StressSource,
    /// The resistance check, if one was made.
    pub resistance: Option<StressCheckResult>,
}

impl StressApplication {
    /// Stress actually added after resistance and clamping.
    pub fn stress_gained(&self) -> i32 {
        self.current.current_stress() - self.previous.current_stress()
    }

    /// Band before the change.
    pub fn previous_threshold(&self) -> StressThreshold {
        self.previous.threshold()
    }

    /// Band after the change.
    pub fn new_threshold(&self) -> StressThreshold {
        self.current.threshold()
    }

    /// The stress band changed.
    pub fn threshold_crossed(&self) -> bool {
        self.previous_threshold() != self.new_threshold()
    }

    /// Stress is now full and a Trauma Check is due.
    pub fn trauma_check_triggered(&self) -> bool {
        self.current.requires_trauma_check()
    }

    /// How CPS moved along with stress.
    pub fn cps_change(&self) -> CpsStageChange {
        CpsStageChange::from_stress_change(
            self.previous.current_stress(),
            self.current.current_stress(),
        )
    }
}

/// Add `amount` stress from `source`.
///
/// If `resistance_successes` is given, a resistance check with that many
/// successes reduces `amount` first.
pub fn apply_stress(
    state: StressState,
    amount: i32,
    source: StressSource,
    resistance_successes: Option<i32>,
) -> TraumaResult<StressApplication> {
    let amount = require_non_negative("apply_stress", amount)?;
    let resistance = resistance_successes
        .map(|successes| StressCheckResult::create(successes, amount))
        .transpose()?;
    commit_stress(state, amount, source, resistance)
}

/// Roll `pool` to resist `amount` stress from `source`, then apply what gets through.
pub fn apply_stress_rolled<R: Rng>(
    state: StressState,
    amount: i32,
    source: StressSource,
    pool: &DicePool,
    rng: &mut R,
) -> TraumaResult<StressApplication> {
    let amount = require_non_negative("apply_stress", amount)?;
    let base = u32::try_from(amount).unwrap_or_default();
    let resistance = StressCheckResult::roll(pool, base, rng);
    commit_stress(state, amount, source, Some(resistance))
}

fn commit_stress(
    state: StressState,
    amount: i32,
    source: StressSource,
    resistance: Option<StressCheckResult>,
) -> TraumaResult<StressApplication> {
    let gained = match resistance {
        Some(check) => i32::try_from(check.final_stress()).unwrap_or(amount),
        None => amount,
    };
    let result = StressApplication {
        previous: state,
        current: state.with_stress_added(gained)?,
        source,
        resistance,
    };

    debug!(
        meter = StressState::NAME,
        %source,
        base = amount,
        gained = result.stress_gained(),
        previous = result.previous.current_stress(),
        current = result.current.current_stress(),
        "stress applied"
    );
    if result.threshold_crossed() {
        info!(
            meter = StressState::NAME,
            from = %result.previous_threshold(),
            to = %result.new_threshold(),
            "stress threshold crossed"
        );
    }
    let cps = result.cps_change();
    if cps.is_critical_transition() {
        warn!(meter = CpsState::NAME, change = %cps, "CPS entered a critical stage");
    } else if cps.stage_changed() {
        info!(meter = CpsState::NAME, change = %cps, "CPS stage changed");
    }
    if result.trauma_check_triggered() {
        warn!(
            meter = StressState::NAME,
            %source,
            "stress is full; trauma check required"
        );
    }
    Ok(result)
}

/// What one rest did for stress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StressRecovery {
    /// Stress before.
    pub previous: StressState,
    /// Stress after.
    pub current: StressState,
    /// The rest taken.
    pub rest: RestType,
}

impl StressRecovery {
    /// Stress removed.
    pub fn amount_recovered(&self) -> i32 {
        self.previous.current_stress() - self.current.current_stress()
    }

    /// Band before the rest.
    pub fn previous_threshold(&self) -> StressThreshold {
        self.previous.threshold()
    }

    /// Band after the rest.
    pub fn new_threshold(&self) -> StressThreshold {
        self.current.threshold()
    }

    /// The rest moved stress into a lower band.
    pub fn threshold_dropped(&self) -> bool {
        self.new_threshold() < self.previous_threshold()
    }

    /// Stress is back to zero.
    pub fn is_full_recovery(&self) -> bool {
        self.current.current_stress() == 0
    }
}

/// Recover stress by resting. `will` is the character's WILL attribute.
pub fn recover_stress(
    state: StressState,
    rest: RestType,
    will: i32,
    config: &EconomyConfig,
) -> TraumaResult<StressRecovery> {
    let will = require_non_negative("recover_stress", will)?;
    let amount = rest.recovery_amount(will, state.current_stress(), config);
    let result = StressRecovery {
        previous: state,
        current: state.with_stress_reduced(amount.max(0))?,
        rest,
    };

    info!(
        meter = StressState::NAME,
        %rest,
        recovered = result.amount_recovered(),
        previous = result.previous.current_stress(),
        current = result.current.current_stress(),
        "stress recovered"
    );
    if result.threshold_dropped() {
        info!(
            from = %result.previous_threshold(),
            to = %result.new_threshold(),
            "stress threshold improved"
        );
    }
    Ok(result)
}
