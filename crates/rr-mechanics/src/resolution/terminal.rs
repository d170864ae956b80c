//! Terminal Error checks.
//!
//! When a meter hits its maximum the character makes a single resistance
//! roll against a difficulty (3 by default). Surviving leaves the meter one
//! short of the top; failing transforms the character into one of the Forlorn.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::dice::DicePool;

/// Difficulty of a Terminal Error check unless the caller says otherwise.
pub const DEFAULT_TERMINAL_DC: u32 = 3;

/// Meter value left behind by a survived Terminal Error.
pub const SURVIVAL_METER_VALUE: i32 = 99;

/// Meter value after a failed Terminal Error.
pub const FORLORN_METER_VALUE: i32 = 100;

/// The outcome of a Terminal Error check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalErrorResult {
    successes: u32,
    required_dc: u32,
    survived: bool,
}

impl TerminalErrorResult {
    /// Shape a survived check. The caller has already compared roll and DC.
    pub fn success(successes: u32, required_dc: u32) -> Self {
        Self {
            successes,
            required_dc,
            survived: true,
        }
    }

    /// Shape a failed check.
    pub fn failure(successes: u32, required_dc: u32) -> Self {
        Self {
            successes,
            required_dc,
            survived: false,
        }
    }

    /// Survive when `successes` meets `required_dc`.
    pub fn resolve(successes: u32, required_dc: u32) -> Self {
        if successes >= required_dc {
            Self::success(successes, required_dc)
        } else {
            Self::failure(successes, required_dc)
        }
    }

    /// Roll `pool` and resolve against `required_dc`.
    pub fn roll<R: Rng>(pool: &DicePool, required_dc: u32, rng: &mut R) -> Self {
        let roll = pool.roll(rng);
        let result = Self::resolve(roll.net_successes(), required_dc);
        if result.survived {
            tracing::info!(
                %roll,
                required_dc,
                critical = result.was_critical_success(),
                "terminal error survived"
            );
        } else {
            tracing::warn!(
                %roll,
                required_dc,
                "terminal error failed; character became Forlorn"
            );
        }
        result
    }

    /// Net successes scored.
    pub fn successes(&self) -> u32 {
        self.successes
    }

    /// The difficulty the roll was made against.
    pub fn required_dc(&self) -> u32 {
        self.required_dc
    }

    /// Whether the character came through.
    pub fn survived(&self) -> bool {
        self.survived
    }

    /// A failed check is permanent.
    pub fn became_forlorn(&self) -> bool {
        !self.survived
    }

    /// The meter value after the check. Survival never fully clears it.
    pub fn final_corruption(&self) -> i32 {
        if self.survived {
            SURVIVAL_METER_VALUE
        } else {
            FORLORN_METER_VALUE
        }
    }

    /// Survived with at least twice the required successes.
    ///
    /// Always false on a failure, however many successes were recorded.
    pub fn was_critical_success(&self) -> bool {
        self.survived && u64::from(self.successes) >= 2 * u64::from(self.required_dc)
    }
}

impl std::fmt::Display for TerminalErrorResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verdict = match (self.survived, self.was_critical_success()) {
            (true, true) => "Survived (critical)",
            (true, false) => "Survived",
            (false, _) => "Forlorn",
        };
        write!(
            f,
            "Terminal Error {}/{}: {verdict}",
            self.successes, self.required_dc
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn survival_leaves_corruption_at_99() {
        let r = TerminalErrorResult::success(3, DEFAULT_TERMINAL_DC);
        assert!(r.survived());
        assert!(!r.became_forlorn());
        assert_eq!(r.final_corruption(), 99);
        assert!(!r.was_critical_success());
    }

    #[test]
    fn critical_success_at_double_dc() {
        let r = TerminalErrorResult::success(6, 3);
        assert!(r.survived());
        assert_eq!(r.final_corruption(), 99);
        assert!(r.was_critical_success());
    }

    #[test]
    fn failure_is_never_critical() {
        let r = TerminalErrorResult::failure(10, 3);
        assert!(!r.survived());
        assert!(r.became_forlorn());
        assert_eq!(r.final_corruption(), 100);
        assert!(!r.was_critical_success());
    }

    #[test]
    fn resolve_compares_against_dc() {
        assert!(TerminalErrorResult::resolve(3, 3).survived());
        assert!(!TerminalErrorResult::resolve(2, 3).survived());
        assert!(TerminalErrorResult::resolve(0, 0).survived());
    }

    #[test]
    fn roll_matches_resolve_of_net_successes() {
        let pool = DicePool::d10(6).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let expected = pool.roll(&mut StdRng::seed_from_u64(11)).net_successes();
        let r = TerminalErrorResult::roll(&pool, DEFAULT_TERMINAL_DC, &mut rng);
        assert_eq!(r.successes(), expected);
        assert_eq!(r.survived(), expected >= DEFAULT_TERMINAL_DC);
    }

    #[test]
    fn display() {
        assert_eq!(
            TerminalErrorResult::success(6, 3).to_string(),
            "Terminal Error 6/3: Survived (critical)"
        );
        assert_eq!(
            TerminalErrorResult::failure(1, 3).to_string(),
            "Terminal Error 1/3: Forlorn"
        );
    }
}
