//! Resolvers that turn dice-pool outcomes into check results.
//!
//! - **Stress resistance**: successes buy a percentage reduction of incoming stress
//! - **Contested check**: two sides compare net successes, fumbles first
//! - **Terminal error**: the one-shot check made when a meter is maxed out
//!
//! Every resolver is a pure function of its inputs. The `roll` helpers only
//! add a dice roll in front, drawing from an injected RNG.

pub mod contested;
pub mod stress_check;
pub mod terminal;

pub use contested::{ContestOutcome, ContestRoll, ContestedCheckResult, Contestant};
pub use stress_check::StressCheckResult;
pub use terminal::TerminalErrorResult;
