//! Error types for dice pools and check resolvers.

/// Errors raised when a pool, roll, or check is constructed with invalid arguments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MechError {
    /// A dice pool must hold at least one die.
    #[error("dice pool must contain at least one die")]
    EmptyPool,

    /// No supported die has this many sides.
    #[error("unsupported die: d{0}")]
    InvalidDie(u32),

    /// A die tag could not be parsed.
    #[error("not a die tag: {0:?}")]
    UnknownDieTag(String),

    /// A rolled face lies outside `1..=sides`.
    #[error("face value {value} is out of range for a d{sides}")]
    InvalidFace {
        /// The offending face value.
        value: u32,
        /// Sides on the die the face was supposedly rolled on.
        sides: u32,
    },

    /// The number of supplied faces does not match the pool size.
    #[error("expected {expected} face values, got {actual}")]
    FaceCountMismatch {
        /// Dice in the pool.
        expected: u32,
        /// Faces supplied by the caller.
        actual: usize,
    },

    /// A count or amount that must be non-negative was negative.
    #[error("{field} must be non-negative, got {value}")]
    NegativeValue {
        /// Name of the argument.
        field: &'static str,
        /// The rejected value.
        value: i32,
    },
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;

/// Reject a negative argument, otherwise return it as unsigned.
pub(crate) fn non_negative(field: &'static str, value: i32) -> MechResult<u32> {
    u32::try_from(value).map_err(|_| MechError::NegativeValue { field, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_negative_accepts_zero_and_positive() {
        assert_eq!(non_negative("successes", 0), Ok(0));
        assert_eq!(non_negative("successes", 7), Ok(7));
    }

    #[test]
    fn non_negative_rejects_negative() {
        assert_eq!(
            non_negative("base_stress", -1),
            Err(MechError::NegativeValue {
                field: "base_stress",
                value: -1
            })
        );
    }

    #[test]
    fn error_display() {
        assert_eq!(
            MechError::EmptyPool.to_string(),
            "dice pool must contain at least one die"
        );
        assert_eq!(
            MechError::InvalidFace { value: 11, sides: 10 }.to_string(),
            "face value 11 is out of range for a d10"
        );
    }
}
