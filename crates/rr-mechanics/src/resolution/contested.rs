//! Contested checks between an initiator and a defender.
//!
//! Fumbles are decided before magnitudes: a side that fumbles loses even if
//! its raw net successes would have won, and two fumbles cancel out.

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dice::DicePool;

/// What one side brings to a contested check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContestRoll {
    /// Net successes after botches.
    pub net_successes: u32,
    /// Whether the roll fumbled.
    pub is_fumble: bool,
}

impl ContestRoll {
    /// A clean roll with `net_successes`.
    pub fn new(net_successes: u32) -> Self {
        Self {
            net_successes,
            is_fumble: false,
        }
    }

    /// A fumbled roll.
    pub fn fumble() -> Self {
        Self {
            net_successes: 0,
            is_fumble: true,
        }
    }
}

/// One participant in a contested check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contestant {
    /// The acting character.
    pub actor_id: Uuid,
    /// The skill the actor rolled.
    pub skill: String,
    /// The condensed roll.
    pub roll: ContestRoll,
}

impl Contestant {
    /// Create a contestant.
    pub fn new(actor_id: Uuid, skill: impl Into<String>, roll: ContestRoll) -> Self {
        Self {
            actor_id,
            skill: skill.into(),
            roll,
        }
    }
}

/// How a contested check came out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContestOutcome {
    /// The initiator scored more net successes.
    InitiatorWins,
    /// The defender scored more net successes.
    DefenderWins,
    /// Equal net successes, nobody fumbled.
    Tie,
    /// Only the initiator fumbled.
    InitiatorFumble,
    /// Only the defender fumbled.
    DefenderFumble,
    /// Both sides fumbled.
    BothFumble,
}

impl ContestOutcome {
    /// Whether either side fumbled.
    pub fn involves_fumble(self) -> bool {
        matches!(
            self,
            Self::InitiatorFumble | Self::DefenderFumble | Self::BothFumble
        )
    }
}

impl std::fmt::Display for ContestOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InitiatorWins => write!(f, "Initiator Wins"),
            Self::DefenderWins => write!(f, "Defender Wins"),
            Self::Tie => write!(f, "Tie"),
            Self::InitiatorFumble => write!(f, "Initiator Fumble"),
            Self::DefenderFumble => write!(f, "Defender Fumble"),
            Self::BothFumble => write!(f, "Both Fumble"),
        }
    }
}

/// Compare two rolls. Returns the outcome and its non-negative margin.
pub fn determine_outcome(initiator: ContestRoll, defender: ContestRoll) -> (ContestOutcome, u32) {
    match (initiator.is_fumble, defender.is_fumble) {
        (true, true) => (ContestOutcome::BothFumble, 0),
        (true, false) => (ContestOutcome::InitiatorFumble, defender.net_successes),
        (false, true) => (ContestOutcome::DefenderFumble, initiator.net_successes),
        (false, false) => {
            let (i, d) = (initiator.net_successes, defender.net_successes);
            match i.cmp(&d) {
                std::cmp::Ordering::Equal => (ContestOutcome::Tie, 0),
                std::cmp::Ordering::Greater => (ContestOutcome::InitiatorWins, i - d),
                std::cmp::Ordering::Less => (ContestOutcome::DefenderWins, d - i),
            }
        }
    }
}

/// The resolved contest between two actors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestedCheckResult {
    initiator: Contestant,
    defender: Contestant,
    outcome: ContestOutcome,
    margin: u32,
}

impl ContestedCheckResult {
    /// Resolve a contest from two condensed rolls.
    pub fn resolve(initiator: Contestant, defender: Contestant) -> Self {
        let (outcome, margin) = determine_outcome(initiator.roll, defender.roll);
        Self {
            initiator,
            defender,
            outcome,
            margin,
        }
    }

    /// Roll both pools from the same RNG, initiator first, and resolve.
    pub fn roll<R: Rng>(
        initiator_id: Uuid,
        initiator_skill: impl Into<String>,
        initiator_pool: &DicePool,
        defender_id: Uuid,
        defender_skill: impl Into<String>,
        defender_pool: &DicePool,
        rng: &mut R,
    ) -> Self {
        let initiator_roll = initiator_pool.roll(rng);
        let defender_roll = defender_pool.roll(rng);
        let result = Self::resolve(
            Contestant::new(initiator_id, initiator_skill, initiator_roll.contest_roll()),
            Contestant::new(defender_id, defender_skill, defender_roll.contest_roll()),
        );
        tracing::debug!(
            %initiator_roll,
            %defender_roll,
            outcome = %result.outcome,
            margin = result.margin,
            "contested check rolled"
        );
        result
    }

    /// The side that started the contest.
    pub fn initiator(&self) -> &Contestant {
        &self.initiator
    }

    /// The side that opposed it.
    pub fn defender(&self) -> &Contestant {
        &self.defender
    }

    /// The outcome of the contest.
    pub fn outcome(&self) -> ContestOutcome {
        self.outcome
    }

    /// How decisively the contest was won (0 for ties and double fumbles).
    pub fn margin(&self) -> u32 {
        self.margin
    }

    /// The winning actor, or `None` on a tie or a double fumble.
    pub fn winner_id(&self) -> Option<Uuid> {
        match self.outcome {
            ContestOutcome::InitiatorWins | ContestOutcome::DefenderFumble => {
                Some(self.initiator.actor_id)
            }
            ContestOutcome::DefenderWins | ContestOutcome::InitiatorFumble => {
                Some(self.defender.actor_id)
            }
            ContestOutcome::Tie | ContestOutcome::BothFumble => None,
        }
    }
}

impl std::fmt::Display for ContestedCheckResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) vs {} ({}): {} (margin {})",
            self.initiator.skill,
            self.initiator.roll.net_successes,
            self.defender.skill,
            self.defender.roll.net_successes,
            self.outcome,
            self.margin
        )
    }
}
