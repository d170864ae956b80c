//! Error types for meters, traumas, and the economy aggregate.

use thiserror::Error;

/// Result type for trauma economy operations.
pub type TraumaResult<T> = Result<T, TraumaError>;

/// Errors raised when an operation is called with arguments it can't accept.
///
/// Out-of-range meter values are not errors: they are clamped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraumaError {
    /// A directional operation was given a negative amount.
    #[error("{operation} requires a non-negative amount, got {amount}")]
    NegativeAmount {
        /// The operation that rejected the amount.
        operation: &'static str,
        /// The rejected amount.
        amount: i32,
    },

    /// An operation that must move something was given nothing to move.
    #[error("{0} requires a positive amount, got 0")]
    ZeroAmount(&'static str),

    /// A meter cap was negative.
    #[error("meter maximum must be non-negative, got {0}")]
    NegativeMax(i32),

    /// A required string was empty or whitespace.
    #[error("{0} must not be blank")]
    BlankField(&'static str),

    /// A trigger requires a check but names no difficulty.
    #[error("a trigger that requires a check must specify its difficulty")]
    MissingCheckDifficulty,

    /// The nil UUID was given as a character id.
    #[error("character id must not be nil")]
    EmptyCharacterId,

    /// A trauma was offered to a character it doesn't belong to.
    #[error("trauma belongs to character {owner}, not {character}")]
    ForeignTrauma {
        /// The character the trauma was recorded for.
        owner: uuid::Uuid,
        /// The character whose state rejected it.
        character: uuid::Uuid,
    },

    /// Economy configuration failed validation or parsing.
    #[error("invalid economy config: {0}")]
    InvalidConfig(String),

    /// A dice or resolver error.
    #[error(transparent)]
    Mechanics(#[from] rr_mechanics::MechError),
}

/// Reject a negative amount for a directional operation.
pub(crate) fn require_non_negative(operation: &'static str, amount: i32) -> TraumaResult<i32> {
    if amount < 0 {
        return Err(TraumaError::NegativeAmount { operation, amount });
    }
    Ok(amount)
}

/// Reject an amount that is negative or zero.
pub(crate) fn require_positive(operation: &'static str, amount: i32) -> TraumaResult<i32> {
    match require_non_negative(operation, amount)? {
        0 => Err(TraumaError::ZeroAmount(operation)),
        amount => Ok(amount),
    }
}

/// Reject an empty or whitespace-only string.
pub(crate) fn require_non_blank(field: &'static str, value: &str) -> TraumaResult<()> {
    if value.trim().is_empty() {
        return Err(TraumaError::BlankField(field));
    }
    Ok(())
}
