//! The trauma economy: one character's three meters and the traumas they carry.
//!
//! [`TraumaEconomyState`] is the live aggregate. [`TraumaEconomySnapshot`]
//! flattens it into an immutable record for audit trails, and
//! [`SnapshotHistory`] keeps a bounded run of those records.

pub mod history;
pub mod snapshot;

pub use history::SnapshotHistory;
pub use snapshot::TraumaEconomySnapshot;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::EconomyConfig;
use crate::error::{TraumaError, TraumaResult};
use crate::meter::{CorruptionState, CpsState, METER_MAX, Meter, StressState};
use crate::trauma::CharacterTrauma;

/// How close a character is to collapse, worst last.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum WarningLevel {
    /// Every system is below the warning threshold.
    #[default]
    None,
    /// Stress or corruption has reached the warning threshold.
    Elevated,
    /// A system is at the critical threshold, or CPS demands panic checks.
    Critical,
    /// Stress or corruption is full.
    Terminal,
}

impl WarningLevel {
    /// Classify a stress or corruption value against the configured thresholds.
    pub fn for_value(value: i32, config: &EconomyConfig) -> Self {
        if value >= config.terminal_threshold {
            Self::Terminal
        } else if value >= config.critical_threshold {
            Self::Critical
        } else if value >= config.warning_threshold {
            Self::Elevated
        } else {
            Self::None
        }
    }

    /// CPS never raises the level past `Critical`, and only once panic checks start.
    pub fn for_cps(cps: &CpsState) -> Self {
        if cps.requires_panic_check() {
            Self::Critical
        } else {
            Self::None
        }
    }

    /// Whether this level calls for the player's attention.
    pub fn is_alarming(self) -> bool {
        self >= Self::Critical
    }
}

impl std::fmt::Display for WarningLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::None => "None",
            Self::Elevated => "Elevated",
            Self::Critical => "Critical",
            Self::Terminal => "Terminal",
        };
        f.write_str(label)
    }
}

/// The combined psychological state of one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraumaEconomyState {
    character_id: Uuid,
    stress: StressState,
    corruption: CorruptionState,
    cps: CpsState,
    traumas: Vec<CharacterTrauma>,
}

impl TraumaEconomyState {
    /// Assemble a state from meters and traumas. The nil UUID is rejected.
    pub fn new(
        character_id: Uuid,
        stress: StressState,
        corruption: CorruptionState,
        cps: CpsState,
        traumas: Vec<CharacterTrauma>,
    ) -> TraumaResult<Self> {
        if character_id.is_nil() {
            return Err(TraumaError::EmptyCharacterId);
        }
        Ok(Self {
            character_id,
            stress,
            corruption,
            cps,
            traumas,
        })
    }

    /// Assemble a state with CPS derived from the stress value.
    pub fn from_meters(
        character_id: Uuid,
        stress: StressState,
        corruption: CorruptionState,
    ) -> TraumaResult<Self> {
        let cps = CpsState::from_stress(stress.current_stress());
        Self::new(character_id, stress, corruption, cps, Vec::new())
    }

    /// A fresh character with empty meters.
    pub fn pristine(character_id: Uuid) -> TraumaResult<Self> {
        Self::from_meters(
            character_id,
            StressState::calm(),
            CorruptionState::uncorrupted(),
        )
    }

    /// The character this state belongs to.
    pub fn character_id(&self) -> Uuid {
        self.character_id
    }

    /// Current stress.
    pub fn stress(&self) -> StressState {
        self.stress
    }

    /// Current corruption.
    pub fn corruption(&self) -> CorruptionState {
        self.corruption
    }

    /// Current CPS.
    pub fn cps(&self) -> CpsState {
        self.cps
    }

    /// Every trauma on record, active or not.
    pub fn traumas(&self) -> &[CharacterTrauma] {
        &self.traumas
    }

    /// Replace stress. CPS follows it.
    pub fn with_stress(&self, stress: StressState) -> Self {
        Self {
            stress,
            cps: CpsState::from_stress(stress.current_stress()),
            ..self.clone()
        }
    }

    /// Replace corruption.
    pub fn with_corruption(&self, corruption: CorruptionState) -> Self {
        Self {
            corruption,
            ..self.clone()
        }
    }

    /// Record a trauma. A trauma for a different character is rejected.
    pub fn with_trauma(&self, trauma: CharacterTrauma) -> TraumaResult<Self> {
        if trauma.character_id() != self.character_id {
            return Err(TraumaError::ForeignTrauma {
                owner: trauma.character_id(),
                character: self.character_id,
            });
        }
        let mut next = self.clone();
        next.traumas.push(trauma);
        Ok(next)
    }

    /// Definition ids of traumas that are still active, in acquisition order.
    pub fn active_trauma_ids(&self) -> Vec<String> {
        self.traumas
            .iter()
            .filter(|t| t.is_active())
            .map(|t| t.trauma_definition_id().to_string())
            .collect()
    }

    /// Number of active traumas.
    pub fn active_trauma_count(&self) -> usize {
        self.traumas.iter().filter(|t| t.is_active()).count()
    }

    /// Overall warning level under the default thresholds.
    pub fn warning_level(&self) -> WarningLevel {
        self.warning_level_with(&EconomyConfig::default())
    }

    /// Overall warning level: the worst of the per-meter levels.
    pub fn warning_level_with(&self, config: &EconomyConfig) -> WarningLevel {
        let stress = WarningLevel::for_value(self.stress.current_stress(), config);
        let corruption = WarningLevel::for_value(self.corruption.current_corruption(), config);
        stress.max(corruption).max(WarningLevel::for_cps(&self.cps))
    }

    /// Stress or corruption is at the critical threshold.
    pub fn is_critical(&self) -> bool {
        self.is_critical_with(&EconomyConfig::default())
    }

    /// Stress or corruption is at the configured critical threshold.
    pub fn is_critical_with(&self, config: &EconomyConfig) -> bool {
        self.stress.current_stress() >= config.critical_threshold
            || self.corruption.current_corruption() >= config.critical_threshold
    }

    /// Stress or corruption is full.
    pub fn is_terminal(&self) -> bool {
        self.is_terminal_with(&EconomyConfig::default())
    }

    /// Stress or corruption is at the configured terminal threshold.
    pub fn is_terminal_with(&self, config: &EconomyConfig) -> bool {
        self.stress.current_stress() >= config.terminal_threshold
            || self.corruption.current_corruption() >= config.terminal_threshold
    }

    /// Stress and corruption are both critical at once.
    pub fn has_multiple_critical_systems(&self) -> bool {
        self.has_multiple_critical_systems_with(&EconomyConfig::default())
    }

    /// Stress and corruption are both at the configured critical threshold.
    pub fn has_multiple_critical_systems_with(&self, config: &EconomyConfig) -> bool {
        self.stress.current_stress() >= config.critical_threshold
            && self.corruption.current_corruption() >= config.critical_threshold
    }

    /// Defense lost to stress.
    pub fn total_defense_penalty(&self) -> i32 {
        self.stress.defense_penalty()
    }

    /// Skill dice lost to stress disadvantage and CPS logic disadvantage.
    pub fn total_skill_penalty(&self) -> i32 {
        i32::from(self.stress.has_skill_disadvantage()) + self.cps.logic_disadvantage()
    }

    /// The fuller of stress and corruption, 0.0 to 1.0.
    pub fn highest_system_percentage(&self) -> f64 {
        self.stress.percentage().max(self.corruption.percentage())
    }

    /// Maximum HP once each corruption stage has taken its 5%.
    pub fn effective_max_hp(&self, base: i32) -> i32 {
        stage_scaled(base, self.corruption.stage() as i32)
    }

    /// Maximum AP once each corruption stage has taken its 5%.
    pub fn effective_max_ap(&self, base: i32) -> i32 {
        stage_scaled(base, self.corruption.stage() as i32)
    }

    /// Resolve after losing one point per corruption stage, never below 1.
    pub fn effective_resolve(&self, base: i32) -> i32 {
        (base - self.corruption.stage() as i32).max(1)
    }
}

fn stage_scaled(base: i32, stage: i32) -> i32 {
    let lost = i64::from(base) * i64::from(stage) * 5 / i64::from(METER_MAX);
    (i64::from(base) - lost).clamp(0, i64::from(i32::MAX)) as i32
}

impl std::fmt::Display for TraumaEconomyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TraumaEconomy[{}]: Stress={} Corruption={} Traumas={}",
            self.character_id,
            self.stress.current_stress(),
            self.corruption.current_corruption(),
            self.active_trauma_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn id() -> Uuid {
        Uuid::new_v4()
    }

    fn state(stress: i32, corruption: i32, cps: i32) -> TraumaEconomyState {
        TraumaEconomyState::new(
            id(),
            StressState::create(stress),
            CorruptionState::create(corruption),
            CpsState::create(cps),
            Vec::new(),
        )
        .unwrap()
    }

    #[test]
    fn rejects_nil_character() {
        assert_eq!(
            TraumaEconomyState::pristine(Uuid::nil()),
            Err(TraumaError::EmptyCharacterId)
        );
    }

    #[test]
    fn from_meters_derives_cps() {
        let s = TraumaEconomyState::from_meters(
            id(),
            StressState::create(65),
            CorruptionState::create(10),
        )
        .unwrap();
        assert_eq!(s.cps().current_value(), 65);
        assert!(s.cps().requires_panic_check());
    }

    #[test]
    fn warning_levels() {
        assert_eq!(state(10, 10, 10).warning_level(), WarningLevel::None);
        assert_eq!(state(70, 10, 10).warning_level(), WarningLevel::Elevated);
        assert_eq!(state(10, 75, 10).warning_level(), WarningLevel::Elevated);
        assert_eq!(state(80, 10, 10).warning_level(), WarningLevel::Critical);
        assert_eq!(state(10, 10, 60).warning_level(), WarningLevel::Critical);
        assert_eq!(state(100, 10, 10).warning_level(), WarningLevel::Terminal);
        assert_eq!(state(10, 100, 90).warning_level(), WarningLevel::Terminal);
    }

    #[test]
    fn cps_alone_drives_critical() {
        let s = state(65, 40, 65);
        assert_eq!(s.stress().defense_penalty(), 3);
        assert!(!s.is_critical());
        assert_eq!(s.warning_level(), WarningLevel::Critical);
    }

    #[test]
    fn custom_thresholds() {
        let cfg = EconomyConfig::default().with_thresholds(50, 60, 90);
        let s = state(55, 0, 0);
        assert_eq!(s.warning_level_with(&cfg), WarningLevel::Elevated);
        let full = state(92, 0, 0);
        assert_eq!(full.warning_level_with(&cfg), WarningLevel::Terminal);
        assert!(state(61, 0, 0).is_critical_with(&cfg));
        assert!(!state(61, 0, 0).is_critical());
    }

    #[test]
    fn warning_level_is_ordered() {
        assert!(WarningLevel::None < WarningLevel::Elevated);
        assert!(WarningLevel::Elevated < WarningLevel::Critical);
        assert!(WarningLevel::Critical < WarningLevel::Terminal);
        assert!(WarningLevel::Critical.is_alarming());
        assert!(!WarningLevel::Elevated.is_alarming());
    }

    #[test]
    fn multiple_critical_systems() {
        assert!(state(85, 80, 0).has_multiple_critical_systems());
        assert!(!state(85, 79, 0).has_multiple_critical_systems());
    }

    #[test]
    fn multiple_critical_systems_follow_config() {
        let cfg = EconomyConfig::default().with_thresholds(50, 60, 90);
        let s = state(65, 62, 0);
        assert!(!s.has_multiple_critical_systems());
        assert!(s.has_multiple_critical_systems_with(&cfg));
        assert!(!state(65, 59, 0).has_multiple_critical_systems_with(&cfg));
    }

    #[test]
    fn penalties() {
        let s = state(85, 0, 65);
        assert_eq!(s.total_defense_penalty(), 4);
        assert_eq!(s.total_skill_penalty(), 3);
        let highest = state(30, 60, 0).highest_system_percentage();
        assert!((highest - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn corruption_erodes_maximums() {
        let s = state(0, 45, 0);
        assert_eq!(s.effective_max_hp(100), 90);
        assert_eq!(s.effective_max_ap(50), 45);
        assert_eq!(s.effective_resolve(10), 8);
        assert_eq!(state(0, 100, 0).effective_resolve(3), 1);
    }

    #[test]
    fn traumas_and_active_ids() {
        let s = TraumaEconomyState::pristine(id()).unwrap();
        let a = CharacterTrauma::new(s.character_id(), "paranoia", "Combat", Utc::now()).unwrap();
        let b = CharacterTrauma::new(s.character_id(), "night-terrors", "Narrative", Utc::now())
            .unwrap()
            .deactivated();
        let s = s.with_trauma(a).unwrap().with_trauma(b).unwrap();
        assert_eq!(s.traumas().len(), 2);
        assert_eq!(s.active_trauma_ids(), vec!["paranoia".to_string()]);
        assert_eq!(s.active_trauma_count(), 1);

        let stranger = CharacterTrauma::new(id(), "paranoia", "Combat", Utc::now()).unwrap();
        assert!(matches!(
            s.with_trauma(stranger),
            Err(TraumaError::ForeignTrauma { .. })
        ));
    }

    #[test]
    fn with_stress_moves_cps() {
        let s = TraumaEconomyState::pristine(id()).unwrap();
        let s = s.with_stress(StressState::create(82));
        assert!(s.cps().is_hollow_shell());
        let s = s.with_corruption(CorruptionState::create(50));
        assert!(s.corruption().is_faction_locked());
    }
}
