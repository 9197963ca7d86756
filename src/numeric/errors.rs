// ============================================================================
// Numeric Errors
// Error types for fixed-point encoding and decay-rate calculations
// ============================================================================

use std::fmt;

/// Errors that can occur while encoding, decoding or deriving decay values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Value does not fit in the 64.64 window (integer part >= 2^64)
    Overflow,
    /// Negative, NaN or infinite input where a non-negative real is required
    InvalidInput,
    /// Decay level would be >= 1.0, or the rate lies outside [0, 1)
    InvalidDecayRate,
    /// Period of zero minutes
    InvalidPeriod,
    /// Hex string is malformed or carries fewer than 64 bits
    Format,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => write!(
                f,
                "arithmetic overflow: value does not fit in 64.64 fixed-point"
            ),
            NumericError::InvalidInput => write!(
                f,
                "invalid input: value must be finite and non-negative"
            ),
            NumericError::InvalidDecayRate => {
                write!(f, "demurrage level must be less than 100%")
            },
            NumericError::InvalidPeriod => {
                write!(f, "invalid period: period must be at least one minute")
            },
            NumericError::Format => write!(
                f,
                "invalid hex value: at least 64 bits of hex digits are required"
            ),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
