//! The Rune & Rust trauma economy.
//!
//! Tracks three correlated 0-100 meters per character (Psychic Stress,
//! Runic Blight Corruption, and Cognitive Paradox Syndrome), the traumas
//! they leave behind, and an aggregate warning level. Every meter is an
//! immutable value: operations return a new meter. Dice resolution lives in
//! `rr-mechanics`; this crate consumes its results.

pub mod config;
pub mod economy;
pub mod error;
pub mod meter;
pub mod pipeline;
pub mod trauma;

pub use config::EconomyConfig;
pub use economy::{SnapshotHistory, TraumaEconomySnapshot, TraumaEconomyState, WarningLevel};
pub use error::{TraumaError, TraumaResult};
pub use meter::{
    CorruptionStage, CorruptionState, CpsStage, CpsStageChange, CpsState, Meter, StressState,
    StressThreshold,
};
pub use pipeline::{
    CorruptionChange, CorruptionSource, RestType, StressApplication, StressRecovery, StressSource,
    TerminalErrorOutcome, apply_corruption, apply_stress, recover_stress, resolve_terminal_error,
};
pub use trauma::{CharacterTrauma, TraumaTrigger};
