//! Dice pools and check resolvers for the Rune & Rust trauma economy.
//!
//! Provides success-counting d10 pools with botch and fumble handling, plus
//! the three resolvers that feed the psychological meters: stress resistance,
//! contested checks, and Terminal Error checks. All randomness is injected.

pub mod dice;
pub mod error;
pub mod resolution;

pub use dice::{DicePool, Die, FumbleRule, RollResult};
pub use error::{MechError, MechResult};
pub use resolution::{
    ContestOutcome, ContestRoll, ContestedCheckResult, Contestant, StressCheckResult,
    TerminalErrorResult,
};
