// ============================================================================
// 64.64 Fixed-Point
// Bit-exact codec for the unsigned 64.64 format unpacked by the token contract
// ============================================================================

use super::errors::{NumericError, NumericResult};
use rust_decimal::Decimal;
use std::fmt;
use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;

/// Unsigned 64.64 fixed-point number.
///
/// Stores `value × 2^64` as a u128: the high 64 bits hold the integer part,
/// the low 64 bits hold the binary fraction. This is the packing the on-chain
/// demurrage contract uses for its decay level, so the raw integer is the ABI
/// argument itself.
///
/// # Example
/// ```
/// use demurrage_codec::numeric::FixedPoint64x64;
///
/// let one = FixedPoint64x64::encode(1.0).unwrap();
/// assert_eq!(one, FixedPoint64x64::ONE);
/// assert_eq!(one.raw_value(), 18_446_744_073_709_551_616);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct FixedPoint64x64(u128);

impl FixedPoint64x64 {
    /// Number of fractional bits
    pub const FRACTION_BITS: u32 = 64;

    /// Mask selecting the fractional bits (2^64 - 1)
    pub const FRACTION_MASK: u128 = (1u128 << Self::FRACTION_BITS) - 1;

    /// Zero value
    pub const ZERO: Self = Self(0);

    /// One (1.0 = 2^64)
    pub const ONE: Self = Self(1u128 << Self::FRACTION_BITS);

    /// Maximum representable value
    pub const MAX: Self = Self(u128::MAX);

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from the raw packed integer.
    #[inline]
    pub const fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    /// Encode a non-negative real number.
    ///
    /// Works from the shortest decimal representation of `value`, not from its
    /// binary float bits, so `0.02` is encoded as the rate a person typed.
    /// The fraction is expanded one bit at a time by repeated doubling; a bit
    /// is set only when the doubled fraction is strictly greater than one.
    ///
    /// # Errors
    /// - `InvalidInput` for negative, NaN or infinite values
    /// - `Overflow` if the integer part does not fit in 64 bits
    pub fn encode(value: f64) -> NumericResult<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(NumericError::InvalidInput);
        }

        // abs() folds -0.0, which would otherwise format as "-0"
        Self::encode_digits(&value.abs().to_string())
    }

    /// Encode a decimal, using its exact digits.
    ///
    /// # Errors
    /// - `InvalidInput` for negative values
    /// - `Overflow` if the integer part does not fit in 64 bits
    pub fn from_decimal(value: Decimal) -> NumericResult<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(NumericError::InvalidInput);
        }

        Self::encode_digits(&value.abs().to_string())
    }

    fn encode_digits(digits: &str) -> NumericResult<Self> {
        let (int_digits, frac_digits) = digits.split_once('.').unwrap_or((digits, "0"));

        let integer: u128 = int_digits.parse().map_err(int_error)?;
        if integer > u128::from(u64::MAX) {
            return Err(NumericError::Overflow);
        }

        let mut fraction: f64 = format!("0.{frac_digits}")
            .parse()
            .map_err(|_| NumericError::InvalidInput)?;

        let mut bits: u64 = 0;
        for i in 0..Self::FRACTION_BITS {
            fraction *= 2.0;
            if fraction > 1.0 {
                bits |= 1u64 << (63 - i);
                fraction -= 1.0;
            }
        }

        tracing::trace!(digits, fraction_bits = bits, "encoded 64.64 value");

        Ok(Self((integer << Self::FRACTION_BITS) | u128::from(bits)))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get the raw packed integer (the ABI value).
    #[inline]
    pub const fn raw_value(self) -> u128 {
        self.0
    }

    /// Get the integer part (high 64 bits).
    #[inline]
    pub const fn integer_part(self) -> u64 {
        (self.0 >> Self::FRACTION_BITS) as u64
    }

    /// Get the fractional bits (low 64 bits).
    #[inline]
    pub const fn fractional_bits(self) -> u64 {
        (self.0 & Self::FRACTION_MASK) as u64
    }

    /// Check if value is zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    // ========================================================================
    // Decoding
    // ========================================================================

    /// Decode to a real number.
    ///
    /// The fraction is the sum of `2^-(i+1)` over every set bit `63 - i`,
    /// i.e. `bits / 2^64`, rounded to f64 once. The integer part and the
    /// fraction's decimal digits are then joined and parsed.
    pub fn decode(self) -> f64 {
        let fraction = self.fractional_bits() as f64 / 2f64.powi(Self::FRACTION_BITS as i32);

        let mut integer = u128::from(self.integer_part());

        // Fractions within 2^10 of 2^64 round to exactly 1.0
        let digits = if fraction >= 1.0 {
            integer += 1;
            String::from("0")
        } else {
            fraction.to_string()
        };
        let frac_digits = digits.split_once('.').map_or("0", |(_, d)| d);

        format!("{integer}.{frac_digits}")
            .parse()
            .expect("integer and fraction digits form a valid literal")
    }
}

fn int_error(err: ParseIntError) -> NumericError {
    match err.kind() {
        IntErrorKind::PosOverflow => NumericError::Overflow,
        _ => NumericError::InvalidInput,
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<FixedPoint64x64> for u128 {
    #[inline]
    fn from(value: FixedPoint64x64) -> Self {
        value.0
    }
}

impl From<u128> for FixedPoint64x64 {
    #[inline]
    fn from(raw: u128) -> Self {
        Self(raw)
    }
}

impl FromStr for FixedPoint64x64 {
    type Err = NumericError;

    /// Parse the raw packed integer from its decimal form (e.g. an ABI argument
    /// rendered as text).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(NumericError::InvalidInput);
        }
        s.parse::<u128>().map(Self).map_err(int_error)
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Debug for FixedPoint64x64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedPoint64x64({}, raw={})", self.decode(), self.0)
    }
}

/// Displays the raw packed integer.
impl fmt::Display for FixedPoint64x64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for FixedPoint64x64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::UpperHex for FixedPoint64x64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

// ============================================================================
// Serde (decimal string on the wire, hex accepted on input)
// ============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for FixedPoint64x64 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for FixedPoint64x64 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <String as serde::Deserialize<'de>>::deserialize(deserializer)?;
        let parsed = if text.starts_with("0x") || text.starts_with("0X") {
            super::interchange::parse_hex(&text)
        } else {
            text.parse()
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================
