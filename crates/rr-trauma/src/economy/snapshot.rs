//! Point-in-time captures of a character's trauma economy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{TraumaEconomyState, WarningLevel};
use crate::config::EconomyConfig;
use crate::meter::{CorruptionStage, CpsStage, METER_MAX, METER_MIN, Meter, StressThreshold};

/// A flattened, immutable copy of a [`TraumaEconomyState`].
///
/// Fields are public so a persistence layer can rebuild snapshots it has
/// stored; [`is_valid`](Self::is_valid) checks that such a rebuild is
/// internally consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraumaEconomySnapshot {
    /// The character captured. Nil only in [`empty`](Self::empty).
    pub character_id: Uuid,
    /// When the capture was taken.
    pub captured_at: DateTime<Utc>,
    /// Stress value.
    pub stress: i32,
    /// Stress band.
    pub stress_threshold: StressThreshold,
    /// Corruption value.
    pub corruption: i32,
    /// Corruption stage.
    pub corruption_stage: CorruptionStage,
    /// CPS value.
    pub cps: i32,
    /// CPS stage.
    pub cps_stage: CpsStage,
    /// Number of active traumas.
    pub trauma_count: usize,
    /// Definition ids of the active traumas.
    pub trauma_ids: Vec<String>,
    /// Overall warning level at capture time.
    pub warning_level: WarningLevel,
    /// Stress or corruption was at the critical threshold.
    pub was_critical: bool,
    /// Stress or corruption was full.
    pub was_terminal: bool,
}

impl TraumaEconomySnapshot {
    /// Capture `state` as of `captured_at`, using the default thresholds.
    pub fn capture(state: &TraumaEconomyState, captured_at: DateTime<Utc>) -> Self {
        Self::capture_with(state, captured_at, &EconomyConfig::default())
    }

    /// Capture `state` as of `captured_at` under `config`.
    pub fn capture_with(
        state: &TraumaEconomyState,
        captured_at: DateTime<Utc>,
        config: &EconomyConfig,
    ) -> Self {
        let trauma_ids = state.active_trauma_ids();
        Self {
            character_id: state.character_id(),
            captured_at,
            stress: state.stress().current_stress(),
            stress_threshold: state.stress().threshold(),
            corruption: state.corruption().current_corruption(),
            corruption_stage: state.corruption().stage(),
            cps: state.cps().current_value(),
            cps_stage: state.cps().stage(),
            trauma_count: trauma_ids.len(),
            trauma_ids,
            warning_level: state.warning_level_with(config),
            was_critical: state.is_critical_with(config),
            was_terminal: state.is_terminal_with(config),
        }
    }

    /// Capture `state` at the current wall-clock time.
    pub fn capture_now(state: &TraumaEconomyState) -> Self {
        Self::capture(state, Utc::now())
    }

    /// A baseline with every value at its minimum and no character.
    pub fn empty() -> Self {
        Self {
            character_id: Uuid::nil(),
            captured_at: DateTime::<Utc>::UNIX_EPOCH,
            stress: METER_MIN,
            stress_threshold: StressThreshold::Calm,
            corruption: METER_MIN,
            corruption_stage: CorruptionStage::Uncorrupted,
            cps: METER_MIN,
            cps_stage: CpsStage::None,
            trauma_count: 0,
            trauma_ids: Vec::new(),
            warning_level: WarningLevel::None,
            was_critical: false,
            was_terminal: false,
        }
    }

    /// Whether this is the [`empty`](Self::empty) baseline.
    pub fn is_empty(&self) -> bool {
        self.character_id.is_nil() && self.captured_at == DateTime::<Utc>::UNIX_EPOCH
    }

    /// Check the snapshot's structural invariants.
    ///
    /// The empty baseline is valid. Anything else needs a character id,
    /// meter values within 0-100, and a trauma count that matches its ids.
    pub fn is_valid(&self) -> bool {
        if self.is_empty() {
            return true;
        }
        let range = METER_MIN..=METER_MAX;
        !self.character_id.is_nil()
            && range.contains(&self.stress)
            && range.contains(&self.corruption)
            && range.contains(&self.cps)
            && self.trauma_count == self.trauma_ids.len()
    }
}

impl Default for TraumaEconomySnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Display for TraumaEconomySnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Snapshot[{}]: Stress={} Corruption={} CPS={} Traumas={}",
            self.captured_at.format("%Y-%m-%dT%H:%M:%SZ"),
            self.stress,
            self.corruption,
            self.cps_stage,
            self.trauma_count
        )
    }
}
