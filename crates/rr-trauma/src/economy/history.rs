//! A bounded run of snapshots for one character.

use tracing::warn;

use super::{TraumaEconomySnapshot, WarningLevel};
use crate::config::EconomyConfig;

/// Snapshots in capture order, oldest first.
#[derive(Debug, Clone, Default)]
pub struct SnapshotHistory {
    snapshots: Vec<TraumaEconomySnapshot>,
    limit: usize,
}

impl SnapshotHistory {
    /// Create a history holding at most `limit` snapshots (0 = unlimited).
    pub fn new(limit: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            limit,
        }
    }

    /// Create a history sized by `config.history_limit`.
    pub fn from_config(config: &EconomyConfig) -> Self {
        Self::new(config.history_limit)
    }

    /// Append a snapshot, dropping the oldest if the history is full.
    ///
    /// Invalid snapshots are kept but logged.
    pub fn push(&mut self, snapshot: TraumaEconomySnapshot) {
        if !snapshot.is_valid() {
            warn!(
                character_id = %snapshot.character_id,
                trauma_count = snapshot.trauma_count,
                trauma_ids = snapshot.trauma_ids.len(),
                "recording invalid trauma economy snapshot"
            );
        }
        self.snapshots.push(snapshot);
        if self.limit > 0 && self.snapshots.len() > self.limit {
            let drain_count = self.snapshots.len() - self.limit;
            self.snapshots.drain(..drain_count);
        }
    }

    /// The most recent snapshot.
    pub fn latest(&self) -> Option<&TraumaEconomySnapshot> {
        self.snapshots.last()
    }

    /// All snapshots, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TraumaEconomySnapshot> {
        self.snapshots.iter()
    }

    /// Number of snapshots held.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// The worst warning level on record.
    pub fn warning_trend(&self) -> WarningLevel {
        self.snapshots
            .iter()
            .map(|s| s.warning_level)
            .max()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economy::TraumaEconomyState;
    use crate::meter::{CorruptionState, Meter, StressState};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn snap(stress: i32, minute: u32) -> TraumaEconomySnapshot {
        let state = TraumaEconomyState::from_meters(
            Uuid::new_v4(),
            StressState::create(stress),
            CorruptionState::uncorrupted(),
        )
        .unwrap();
        TraumaEconomySnapshot::capture(
            &state,
            Utc.with_ymd_and_hms(2026, 1, 1, 0, minute, 0).unwrap(),
        )
    }

    #[test]
    fn push_and_latest() {
        let mut history = SnapshotHistory::new(0);
        assert!(history.is_empty());
        assert_eq!(history.latest(), None);
        history.push(snap(10, 0));
        history.push(snap(20, 1));
        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().map(|s| s.stress), Some(20));
    }

    #[test]
    fn limit_drops_oldest() {
        let mut history =
            SnapshotHistory::from_config(&EconomyConfig::default().with_history_limit(2));
        for (i, stress) in [10, 20, 30, 40].into_iter().enumerate() {
            history.push(snap(stress, i as u32));
        }
        let kept: Vec<i32> = history.iter().map(|s| s.stress).collect();
        assert_eq!(kept, vec![30, 40]);
    }

    #[test]
    fn warning_trend_is_the_worst_level() {
        let mut history = SnapshotHistory::new(0);
        assert_eq!(history.warning_trend(), WarningLevel::None);
        history.push(snap(72, 0));
        history.push(snap(85, 1));
        history.push(snap(10, 2));
        assert_eq!(history.warning_trend(), WarningLevel::Critical);
    }

    #[test]
    fn invalid_snapshots_are_still_recorded() {
        let mut history = SnapshotHistory::new(0);
        let mut bad = snap(10, 0);
        bad.trauma_count = 4;
        history.push(bad);
        assert_eq!(history.len(), 1);
        let latest = history.latest().unwrap();
        assert!(!latest.is_valid());
    }
}
