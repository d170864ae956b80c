//! Corruption gain and transfer.

use rand::Rng;
use rr_mechanics::{DicePool, TerminalErrorResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::EconomyConfig;
use crate::error::{TraumaResult, require_non_negative, require_positive};
use crate::meter::{CorruptionStage, CorruptionState, Meter};

/// Where incoming corruption came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorruptionSource {
    /// Casting through the Blight.
    MysticMagic,
    /// Using a heretical ability.
    HereticalAbility,
    /// Handling a tainted artifact.
    Artifact,
    /// Blighted ground and air.
    Environmental,
    /// Eating or drinking something tainted.
    Consumable,
    /// Taking part in a ritual.
    Ritual,
    /// Touching one of the Forlorn.
    ForlornContact,
    /// Taking corruption from another character.
    BlightTransfer,
}

impl std::fmt::Display for CorruptionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// What one gain of corruption did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorruptionChange {
    /// Corruption before.
    pub previous: CorruptionState,
    /// Corruption after.
    pub current: CorruptionState,
    /// What caused it.
    pub source: CorruptionSource,
}

impl CorruptionChange {
    /// Corruption actually added after clamping.
    pub fn amount_gained(&self) -> i32 {
        self.current.current_corruption() - self.previous.current_corruption()
    }

    /// Stage before the change.
    pub fn previous_stage(&self) -> CorruptionStage {
        self.previous.stage()
    }

    /// Stage after the change.
    pub fn new_stage(&self) -> CorruptionStage {
        self.current.stage()
    }

    /// The corruption stage changed.
    pub fn stage_crossed(&self) -> bool {
        self.previous_stage() != self.new_stage()
    }

    /// Milestones (25, 50, 75) passed by this change, lowest first.
    pub fn thresholds_crossed(&self) -> Vec<i32> {
        self.previous.milestones_crossed(&self.current)
    }

    /// This change is the one that locked the character out of factions.
    pub fn now_faction_locked(&self) -> bool {
        !self.previous.is_faction_locked() && self.current.is_faction_locked()
    }

    /// Corruption is full and a Terminal Error check is due.
    pub fn is_terminal_error(&self) -> bool {
        self.current.requires_mutation_check()
    }
}

/// Add `amount` corruption from `source`.
pub fn apply_corruption(
    state: CorruptionState,
    amount: i32,
    source: CorruptionSource,
) -> TraumaResult<CorruptionChange> {
    let amount = require_non_negative("apply_corruption", amount)?;
    let result = CorruptionChange {
        previous: state,
        current: state.with_corruption_added(amount)?,
        source,
    };

    debug!(
        meter = CorruptionState::NAME,
        %source,
        gained = result.amount_gained(),
        previous = result.previous.current_corruption(),
        current = result.current.current_corruption(),
        "corruption applied"
    );
    for milestone in result.thresholds_crossed() {
        warn!(
            meter = CorruptionState::NAME,
            milestone,
            current = result.current.current_corruption(),
            "corruption milestone crossed"
        );
    }
    if result.stage_crossed() {
        info!(
            meter = CorruptionState::NAME,
            from = %result.previous_stage(),
            to = %result.new_stage(),
            "corruption stage changed"
        );
    }
    if result.now_faction_locked() {
        warn!(
            current = result.current.current_corruption(),
            "faction reputation locked"
        );
    }
    if result.is_terminal_error() {
        warn!(
            meter = CorruptionState::NAME,
            %source,
            "corruption is full; terminal error check required"
        );
    }
    Ok(result)
}

/// A resolved Terminal Error and the corruption it leaves behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalErrorOutcome {
    /// The check as rolled.
    pub check: TerminalErrorResult,
    /// Corruption after the check: 99 on survival, 100 once Forlorn.
    pub corruption: CorruptionState,
}

/// Roll a Terminal Error check for full corruption against `config.terminal_error_dc`.
///
/// Returns `None` when `state` isn't full; nothing is rolled in that case.
pub fn resolve_terminal_error<R: Rng>(
    state: CorruptionState,
    pool: &DicePool,
    config: &EconomyConfig,
    rng: &mut R,
) -> Option<TerminalErrorOutcome> {
    if !state.requires_mutation_check() {
        return None;
    }
    let check = TerminalErrorResult::roll(pool, config.terminal_error_dc, rng);
    let corruption = state.after_terminal_error(&check);
    info!(
        meter = CorruptionState::NAME,
        %check,
        corruption = corruption.current_corruption(),
        "terminal error resolved"
    );
    Some(TerminalErrorOutcome { check, corruption })
}

/// Corruption moved from one character to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorruptionTransfer {
    /// Corruption taken from the donor. The recipient may gain less if it fills up.
    pub amount: i32,
    /// The giver's corruption after the transfer.
    pub donor: CorruptionState,
    /// The receiver's gain, sourced as [`CorruptionSource::BlightTransfer`].
    pub recipient: CorruptionChange,
}

/// Move `amount` corruption from `donor` to `recipient`.
///
/// Returns `Ok(None)` when the donor doesn't carry that much corruption;
/// neither meter changes in that case. A zero amount is an error, not a
/// no-op transfer.
pub fn transfer_corruption(
    donor: CorruptionState,
    recipient: CorruptionState,
    amount: i32,
) -> TraumaResult<Option<CorruptionTransfer>> {
    let amount = require_positive("transfer_corruption", amount)?;
    if donor.current_corruption() < amount {
        warn!(
            meter = CorruptionState::NAME,
            available = donor.current_corruption(),
            requested = amount,
            "corruption transfer refused"
        );
        return Ok(None);
    }
    let donor_after = donor.with_corruption_reduced(amount)?;
    let change = apply_corruption(recipient, amount, CorruptionSource::BlightTransfer)?;
    info!(
        meter = CorruptionState::NAME,
        amount,
        donor = donor_after.current_corruption(),
        recipient = change.current.current_corruption(),
        "corruption transferred"
    );
    Ok(Some(CorruptionTransfer {
        amount,
        donor: donor_after,
        recipient: change,
    }))
}
