//! The three psychological meters and the state-machine pattern they share.
//!
//! Each meter wraps one integer clamped to `0..=100` and derives an ordered
//! stage from a static table of `(lower_bound, stage)` pairs. The table is the
//! single source of truth: [`Meter::determine_stage`] and every instance's
//! [`Meter::stage`] read the same slice, so they can't disagree.
//!
//! Meters are values. Every operation returns a new meter and leaves the
//! receiver untouched. Directional operations (`build`, `tick`, and the
//! per-meter `*_added` / `*_reduced` methods) reject negative amounts; the
//! resulting value is always clamped, never rejected.

pub mod corruption;
pub mod cps;
pub mod stress;

pub use corruption::{CorruptionStage, CorruptionState};
pub use cps::{CpsStage, CpsStageChange, CpsState};
pub use stress::{StressState, StressThreshold};

use std::fmt::Debug;

use crate::error::{TraumaError, TraumaResult, require_non_negative};

/// Lowest value any meter can hold.
pub const METER_MIN: i32 = 0;

/// Highest value any meter can hold.
pub const METER_MAX: i32 = 100;

/// Look up the stage for `value` in an ascending `(lower_bound, stage)` table.
///
/// Values below the first bound fall into the first stage.
pub fn stage_for<S: Copy>(table: &[(i32, S)], value: i32) -> S {
    let mut stage = table[0].1;
    for &(lower, candidate) in table {
        if value < lower {
            break;
        }
        stage = candidate;
    }
    stage
}

/// A clamped 0-100 value with a stage derived from a fixed table.
pub trait Meter: Copy + Sized {
    /// The ordered stage enumeration of this meter.
    type Stage: Copy + Ord + Debug + 'static;

    /// Display name used in logs.
    const NAME: &'static str;

    /// Ascending `(lower_bound, stage)` pairs covering `0..=100` without gaps.
    const STAGES: &'static [(i32, Self::Stage)];

    /// Create a meter, clamping `value` into `0..=100`.
    fn create(value: i32) -> Self;

    /// The current value.
    fn value(&self) -> i32;

    /// Whether this meter has reached its terminal condition.
    fn is_terminal(&self) -> bool;

    /// The stage `value` falls into, independent of any instance.
    fn determine_stage(value: i32) -> Self::Stage {
        stage_for(Self::STAGES, value)
    }

    /// The stage of the current value.
    fn stage(&self) -> Self::Stage {
        Self::determine_stage(self.value())
    }

    /// Fraction of the meter filled, from 0.0 to 1.0.
    fn percentage(&self) -> f64 {
        f64::from(self.value()) / f64::from(METER_MAX)
    }

    /// Create a meter that may not start above `max`.
    ///
    /// `value` is clamped into `0..=min(max, 100)`; a negative `max` is a
    /// caller error.
    fn create_at(value: i32, max: i32) -> TraumaResult<Self> {
        if max < 0 {
            return Err(TraumaError::NegativeMax(max));
        }
        Ok(Self::create(value.clamp(METER_MIN, max.min(METER_MAX))))
    }

    /// Accumulate `amount` onto the meter.
    fn build(&self, amount: i32) -> TraumaResult<Self> {
        shifted(*self, "build", amount, true)
    }

    /// Bleed `amount` off the meter, as passive per-turn recovery does.
    fn tick(&self, amount: i32) -> TraumaResult<Self> {
        shifted(*self, "tick", amount, false)
    }

    /// Apply a signed delta. Either direction is allowed; the result is clamped.
    fn modify(&self, delta: i32) -> Self {
        Self::create(self.value().saturating_add(delta))
    }

    /// Return the meter to zero.
    fn reset(&self) -> Self {
        Self::create(METER_MIN)
    }
}

/// Move a meter up (`raise`) or down by a non-negative `amount`.
pub(crate) fn shifted<M: Meter>(
    meter: M,
    operation: &'static str,
    amount: i32,
    raise: bool,
) -> TraumaResult<M> {
    let amount = require_non_negative(operation, amount)?;
    let next = if raise {
        meter.value().saturating_add(amount)
    } else {
        meter.value().saturating_sub(amount)
    };
    Ok(M::create(next))
}
