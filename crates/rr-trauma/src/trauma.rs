//! Trauma triggers and the traumas a character carries.
//!
//! A [`TraumaTrigger`] describes when a trauma may be acquired. When it
//! fires, and the check it demands (if any) fails or is waived, the character
//! gains a [`CharacterTrauma`]. Removing a trauma is a cure action owned by
//! the caller; here a trauma can only be stacked or marked inactive.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{TraumaError, TraumaResult, require_non_blank};

/// Describes an event that can give a character a trauma.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraumaTrigger {
    trigger_type: String,
    condition: Option<String>,
    check_required: bool,
    check_difficulty: Option<u32>,
}

impl TraumaTrigger {
    /// Build a trigger.
    ///
    /// `trigger_type` must not be blank, and a trigger that requires a check
    /// must say how hard the check is.
    pub fn new(
        trigger_type: impl Into<String>,
        condition: Option<String>,
        check_required: bool,
        check_difficulty: Option<u32>,
    ) -> TraumaResult<Self> {
        let trigger_type = trigger_type.into();
        require_non_blank("trigger_type", &trigger_type)?;
        if check_required && check_difficulty.is_none() {
            return Err(TraumaError::MissingCheckDifficulty);
        }
        Ok(Self {
            trigger_type,
            condition,
            check_required,
            check_difficulty,
        })
    }

    /// A trigger that fires without any check.
    pub fn unchecked(trigger_type: impl Into<String>) -> TraumaResult<Self> {
        Self::new(trigger_type, None, false, None)
    }

    /// A trigger that fires unless the character makes a check against `difficulty`.
    pub fn checked(trigger_type: impl Into<String>, difficulty: u32) -> TraumaResult<Self> {
        Self::new(trigger_type, None, true, Some(difficulty))
    }

    /// Attach a free-form qualifier.
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// The kind of event, e.g. `"AllyDeath"`.
    pub fn trigger_type(&self) -> &str {
        &self.trigger_type
    }

    /// Optional qualifier on the event.
    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    /// Whether the character may resist with a check.
    pub fn check_required(&self) -> bool {
        self.check_required
    }

    /// Difficulty of the check, if one applies.
    pub fn check_difficulty(&self) -> Option<u32> {
        self.check_difficulty
    }

    /// Whether this trigger gives the character its trauma.
    ///
    /// `check_successes` is the result of the resistance check, or `None`
    /// if the check was waived. Without a required check the trauma always
    /// lands.
    pub fn should_acquire(&self, check_successes: Option<u32>) -> bool {
        match (self.check_required, self.check_difficulty, check_successes) {
            (false, _, _) | (true, _, None) => true,
            (true, Some(dc), Some(successes)) => successes < dc,
            (true, None, Some(_)) => true,
        }
    }
}

impl std::fmt::Display for TraumaTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.trigger_type)?;
        if let Some(condition) = &self.condition {
            write!(f, " ({condition})")?;
        }
        if let Some(dc) = self.check_difficulty.filter(|_| self.check_required) {
            write!(f, " [DC {dc}]")?;
        }
        Ok(())
    }
}

/// A trauma a character has acquired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterTrauma {
    id: Uuid,
    character_id: Uuid,
    trauma_definition_id: String,
    source: String,
    acquired_at: DateTime<Utc>,
    is_active: bool,
    stack_count: u32,
}

impl CharacterTrauma {
    /// Record a newly acquired trauma.
    ///
    /// The definition id is stored lowercase so lookups are case-insensitive.
    pub fn new(
        character_id: Uuid,
        trauma_definition_id: &str,
        source: impl Into<String>,
        acquired_at: DateTime<Utc>,
    ) -> TraumaResult<Self> {
        if character_id.is_nil() {
            return Err(TraumaError::EmptyCharacterId);
        }
        require_non_blank("trauma_definition_id", trauma_definition_id)?;
        let source = source.into();
        require_non_blank("source", &source)?;
        Ok(Self {
            id: Uuid::new_v4(),
            character_id,
            trauma_definition_id: trauma_definition_id.trim().to_lowercase(),
            source,
            acquired_at,
            is_active: true,
            stack_count: 1,
        })
    }

    /// Record a trauma acquired through `trigger`, using its type as the source.
    pub fn from_trigger(
        character_id: Uuid,
        trauma_definition_id: &str,
        trigger: &TraumaTrigger,
        acquired_at: DateTime<Utc>,
    ) -> TraumaResult<Self> {
        Self::new(
            character_id,
            trauma_definition_id,
            trigger.trigger_type(),
            acquired_at,
        )
    }

    /// Unique id of this record.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The character who carries the trauma.
    pub fn character_id(&self) -> Uuid {
        self.character_id
    }

    /// The trauma definition, lowercased.
    pub fn trauma_definition_id(&self) -> &str {
        &self.trauma_definition_id
    }

    /// What caused the trauma.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// When the trauma was first acquired.
    pub fn acquired_at(&self) -> DateTime<Utc> {
        self.acquired_at
    }

    /// Inactive traumas are kept for the record but no longer count.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// How many times a stackable trauma has been acquired.
    pub fn stack_count(&self) -> u32 {
        self.stack_count
    }

    /// The same trauma acquired once more.
    pub fn stacked(&self) -> Self {
        Self {
            stack_count: self.stack_count.saturating_add(1),
            ..self.clone()
        }
    }

    /// The same trauma after it has been suppressed or cured.
    pub fn deactivated(&self) -> Self {
        Self {
            is_active: false,
            ..self.clone()
        }
    }
}

impl std::fmt::Display for CharacterTrauma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} from {}", self.trauma_definition_id, self.source)?;
        if self.stack_count > 1 {
            write!(f, " x{}", self.stack_count)?;
        }
        if !self.is_active {
            write!(f, " (inactive)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap()
    }

    #[test]
    fn trigger_rejects_blank_type() {
        assert_eq!(
            TraumaTrigger::unchecked("   "),
            Err(TraumaError::BlankField("trigger_type"))
        );
    }

    #[test]
    fn trigger_requires_difficulty_when_checked() {
        assert_eq!(
            TraumaTrigger::new("AllyDeath", None, true, None),
            Err(TraumaError::MissingCheckDifficulty)
        );
        let unchecked_with_dc = TraumaTrigger::new("AllyDeath", None, false, Some(3));
        assert!(unchecked_with_dc.is_ok());
    }

    #[test]
    fn trigger_accessors() {
        let t = TraumaTrigger::checked("AllyDeath", 3)
            .unwrap()
            .with_condition("witnessed");
        assert_eq!(t.trigger_type(), "AllyDeath");
        assert_eq!(t.condition(), Some("witnessed"));
        assert!(t.check_required());
        assert_eq!(t.check_difficulty(), Some(3));
        assert_eq!(t.to_string(), "AllyDeath (witnessed) [DC 3]");
    }

    #[test]
    fn should_acquire_rules() {
        let unchecked = TraumaTrigger::unchecked("StressOverflow").unwrap();
        assert!(unchecked.should_acquire(None));
        assert!(unchecked.should_acquire(Some(10)));

        let checked = TraumaTrigger::checked("AllyDeath", 3).unwrap();
        assert!(checked.should_acquire(None));
        assert!(checked.should_acquire(Some(2)));
        assert!(!checked.should_acquire(Some(3)));
        assert!(!checked.should_acquire(Some(5)));
    }

    #[test]
    fn character_trauma_new() {
        let character = Uuid::new_v4();
        let trauma = CharacterTrauma::new(character, "Survivors-Guilt", "AllyDeath", at()).unwrap();
        assert_eq!(trauma.character_id(), character);
        assert_eq!(trauma.trauma_definition_id(), "survivors-guilt");
        assert_eq!(trauma.source(), "AllyDeath");
        assert_eq!(trauma.acquired_at(), at());
        assert!(trauma.is_active());
        assert_eq!(trauma.stack_count(), 1);
        assert!(!trauma.id().is_nil());
    }

    #[test]
    fn character_trauma_rejects_bad_input() {
        assert_eq!(
            CharacterTrauma::new(Uuid::nil(), "x", "y", at()),
            Err(TraumaError::EmptyCharacterId)
        );
        assert_eq!(
            CharacterTrauma::new(Uuid::new_v4(), "", "y", at()),
            Err(TraumaError::BlankField("trauma_definition_id"))
        );
        assert_eq!(
            CharacterTrauma::new(Uuid::new_v4(), "x", " ", at()),
            Err(TraumaError::BlankField("source"))
        );
    }

    #[test]
    fn from_trigger_uses_trigger_type_as_source() {
        let trigger = TraumaTrigger::checked("ForlornContact", 2).unwrap();
        let trauma =
            CharacterTrauma::from_trigger(Uuid::new_v4(), "night-terrors", &trigger, at()).unwrap();
        assert_eq!(trauma.source(), "ForlornContact");
    }

    #[test]
    fn stacked_and_deactivated_return_new_records() {
        let trauma = CharacterTrauma::new(Uuid::new_v4(), "paranoia", "Heretical", at()).unwrap();
        let twice = trauma.stacked();
        assert_eq!(twice.stack_count(), 2);
        assert_eq!(twice.id(), trauma.id());
        assert_eq!(trauma.stack_count(), 1);

        let cured = twice.deactivated();
        assert!(!cured.is_active());
        assert!(twice.is_active());
        assert_eq!(cured.to_string(), "paranoia from Heretical x2 (inactive)");
    }
}
