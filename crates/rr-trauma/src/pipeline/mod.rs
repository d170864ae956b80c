//! Applying stress and corruption to a meter and reporting what changed.
//!
//! Each pipeline step takes the current meter by value and returns a result
//! that carries both the old and new meter, so callers can react to stage
//! crossings without recomputing them. Nothing here stores state: callers
//! that need atomic multi-step updates must serialize their own calls.

pub mod corruption;
pub mod stress;

pub use corruption::{
    CorruptionChange, CorruptionSource, CorruptionTransfer, TerminalErrorOutcome,
    apply_corruption, resolve_terminal_error, transfer_corruption,
};
pub use stress::{
    RestType, StressApplication, StressRecovery, StressSource, apply_stress, apply_stress_rolled,
    recover_stress,
};
