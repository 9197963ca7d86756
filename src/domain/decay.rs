// ============================================================================
// Decay Rate Calculator
// Converts between total demurrage over a period and the per-minute decay level
// ============================================================================

use crate::numeric::{FixedPoint64x64, NumericError, NumericResult};
use chrono::TimeDelta;
use rust_decimal::Decimal;
use std::fmt;
use std::num::NonZeroU64;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Minutes in one day
pub const MINUTES_PER_DAY: u64 = 1_440;

/// Minutes in an average month (365 days / 12)
pub const MINUTES_PER_MONTH: u64 = 43_800;

/// Minutes in a 365-day year
pub const MINUTES_PER_YEAR: u64 = 525_600;

// ============================================================================
// Decay Rate
// ============================================================================

/// Fraction of value removed over the whole period, in `[0, 1)`.
///
/// `0.02` means 2% of a balance is gone once the full period has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct DecayRate(f64);

impl DecayRate {
    /// Create a rate.
    ///
    /// # Errors
    /// Returns `InvalidDecayRate` unless the rate is finite and in `[0, 1)`.
    pub fn new(rate: f64) -> NumericResult<Self> {
        if rate.is_finite() && (0.0..1.0).contains(&rate) {
            Ok(Self(rate))
        } else {
            Err(NumericError::InvalidDecayRate)
        }
    }

    /// Create a rate from a decimal, going through its digits so `0.02`
    /// becomes the same f64 as the literal `0.02`.
    pub fn from_decimal(rate: Decimal) -> NumericResult<Self> {
        let value: f64 = rate
            .to_string()
            .parse()
            .map_err(|_| NumericError::InvalidInput)?;
        Self::new(value)
    }

    /// Create a rate from a percentage (`2.0` -> `0.02`).
    pub fn from_percent(percent: f64) -> NumericResult<Self> {
        Self::new(percent / 100.0)
    }

    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for DecayRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Period
// ============================================================================

/// Number of minutes over which the total rate is realised. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct PeriodMinutes(NonZeroU64);

impl PeriodMinutes {
    /// One average month
    pub const MONTH: Self = Self(match NonZeroU64::new(MINUTES_PER_MONTH) {
        Some(minutes) => minutes,
        None => unreachable!(),
    });

    /// # Errors
    /// Returns `InvalidPeriod` for zero.
    pub fn new(minutes: u64) -> NumericResult<Self> {
        NonZeroU64::new(minutes)
            .map(Self)
            .ok_or(NumericError::InvalidPeriod)
    }

    /// # Errors
    /// - `InvalidPeriod` for zero days
    /// - `Overflow` if the minute count does not fit in u64
    pub fn from_days(days: u64) -> NumericResult<Self> {
        let minutes = days
            .checked_mul(MINUTES_PER_DAY)
            .ok_or(NumericError::Overflow)?;
        Self::new(minutes)
    }

    /// Whole minutes of a duration; sub-minute remainders are dropped.
    ///
    /// # Errors
    /// Returns `InvalidPeriod` if the duration is shorter than one minute.
    pub fn from_duration(duration: TimeDelta) -> NumericResult<Self> {
        let minutes =
            u64::try_from(duration.num_minutes()).map_err(|_| NumericError::InvalidPeriod)?;
        Self::new(minutes)
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for PeriodMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.0)
    }
}

// ============================================================================
// Decay Level
// ============================================================================

/// Per-minute multiplicative factor, strictly between 0 and 1, packed as
/// 64.64 fixed-point. This is the demurrage contract's constructor argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct DecayLevel(FixedPoint64x64);

impl DecayLevel {
    /// # Errors
    /// Returns `InvalidDecayRate` unless `0 < fixed < 1.0`.
    pub fn new(fixed: FixedPoint64x64) -> NumericResult<Self> {
        if fixed.is_zero() || fixed >= FixedPoint64x64::ONE {
            return Err(NumericError::InvalidDecayRate);
        }
        Ok(Self(fixed))
    }

    #[inline]
    pub const fn as_fixed(self) -> FixedPoint64x64 {
        self.0
    }

    #[inline]
    pub const fn raw_value(self) -> u128 {
        self.0.raw_value()
    }

    pub fn decode(self) -> f64 {
        self.0.decode()
    }

    pub fn to_abi_word(self) -> [u8; 32] {
        self.0.to_abi_word()
    }
}

impl From<DecayLevel> for FixedPoint64x64 {
    fn from(level: DecayLevel) -> Self {
        level.0
    }
}

impl fmt::Display for DecayLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// ============================================================================
// Calculations
// ============================================================================

/// Per-minute decay level for a total rate over `period` minutes.
///
/// Computes `(1 - rate)^(1 / period)` and encodes it as 64.64 fixed-point.
///
/// # Errors
/// Returns `InvalidDecayRate` if the level is not strictly below 1.0 (a zero
/// rate, or a rate too small to register over the period).
///
/// # Example
/// ```
/// use demurrage_codec::domain::{calculate_decay_level, DecayRate, PeriodMinutes};
///
/// let level = calculate_decay_level(
///     DecayRate::new(0.02).unwrap(),
///     PeriodMinutes::new(43_800).unwrap(),
/// )
/// .unwrap();
/// assert_eq!(level.raw_value(), 18_446_735_565_168_785_407);
/// ```
pub fn calculate_decay_level(rate: DecayRate, period: PeriodMinutes) -> NumericResult<DecayLevel> {
    let decay_level = (1.0 - rate.value()).powf(1.0 / period.get() as f64);

    if decay_level >= 1.0 {
        tracing::debug!(
            rate = rate.value(),
            period_mins = period.get(),
            "rejected decay level >= 1.0"
        );
        return Err(NumericError::InvalidDecayRate);
    }

    // A valid rate keeps the level at or above ~1.1e-16, far from encoding to
    // zero, so only the >= 1.0 case above can reject.
    let level = DecayLevel(FixedPoint64x64::encode(decay_level)?);

    tracing::debug!(
        rate = rate.value(),
        period_mins = period.get(),
        decay_level,
        raw = %level,
        "calculated decay level"
    );

    Ok(level)
}

/// Total rate realised over `period` minutes by a decay level:
/// `1 - level^period`.
///
/// # Errors
/// Returns `InvalidDecayRate` if the level compounds to nothing over the
/// period (the rate would be 100%).
pub fn calculate_demurrage_rate(
    level: DecayLevel,
    period: PeriodMinutes,
) -> NumericResult<DecayRate> {
    let rate = 1.0 - level.decode().powf(period.get() as f64);

    tracing::debug!(
        raw = %level,
        period_mins = period.get(),
        rate,
        "calculated demurrage rate"
    );

    DecayRate::new(rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn level(rate: f64, minutes: u64) -> NumericResult<DecayLevel> {
        calculate_decay_level(DecayRate::new(rate)?, PeriodMinutes::new(minutes)?)
    }

    #[test]
    fn test_monthly_two_percent() {
        let level = level(0.02, MINUTES_PER_MONTH).unwrap();
        assert_eq!(level.raw_value(), 18_446_735_565_168_785_407);
        assert_eq!(level.as_fixed().to_hex_string(), "0xfffff842f37337ff");
    }

    #[test]
    fn test_zero_rate_rejected() {
        for minutes in [1, 60, MINUTES_PER_MONTH, MINUTES_PER_YEAR] {
            assert_eq!(level(0.0, minutes), Err(NumericError::InvalidDecayRate));
        }
    }

    #[test]
    fn test_negligible_rate_rejected() {
        // 1 - 1e-17 rounds to exactly 1.0
        assert_eq!(level(1e-17, 1), Err(NumericError::InvalidDecayRate));
    }

    #[test]
    fn test_steepest_level_stays_in_range() {
        let level = level(0.999_999_999, MINUTES_PER_YEAR).unwrap();
        assert!(!level.as_fixed().is_zero());
        assert!(level.as_fixed() < FixedPoint64x64::ONE);
        assert_eq!(DecayLevel::new(level.as_fixed()), Ok(level));
    }

    #[test]
    fn test_rate_out_of_range() {
        assert_eq!(DecayRate::new(1.0), Err(NumericError::InvalidDecayRate));
        assert_eq!(DecayRate::new(1.5), Err(NumericError::InvalidDecayRate));
        assert_eq!(DecayRate::new(-0.01), Err(NumericError::InvalidDecayRate));
        assert_eq!(DecayRate::new(f64::NAN), Err(NumericError::InvalidDecayRate));
        assert!(DecayRate::new(0.0).is_ok());
        assert!(DecayRate::new(0.999).is_ok());
    }

    #[test]
    fn test_rate_constructors() {
        let from_decimal = DecayRate::from_decimal(Decimal::new(200, 4)).unwrap(); // 0.0200
        assert_eq!(from_decimal.value(), 0.02);
        assert_eq!(DecayRate::from_percent(2.0).unwrap().value(), 0.02);
        assert_eq!(
            DecayRate::from_decimal(Decimal::new(-2, 2)),
            Err(NumericError::InvalidDecayRate)
        );
    }

    #[test]
    fn test_period_constructors() {
        assert_eq!(PeriodMinutes::new(0), Err(NumericError::InvalidPeriod));
        assert_eq!(PeriodMinutes::from_days(30).unwrap().get(), 43_200);
        assert_eq!(PeriodMinutes::from_days(0), Err(NumericError::InvalidPeriod));
        assert_eq!(PeriodMinutes::from_days(u64::MAX), Err(NumericError::Overflow));
        assert_eq!(PeriodMinutes::MONTH.get(), MINUTES_PER_MONTH);
        assert_eq!(PeriodMinutes::MONTH.to_string(), "43800 min");
    }

    #[test]
    fn test_period_from_duration() {
        let period = PeriodMinutes::from_duration(TimeDelta::seconds(90 * 60 + 59)).unwrap();
        assert_eq!(period.get(), 90);
        assert_eq!(
            PeriodMinutes::from_duration(TimeDelta::seconds(59)),
            Err(NumericError::InvalidPeriod)
        );
        assert_eq!(
            PeriodMinutes::from_duration(TimeDelta::seconds(-600)),
            Err(NumericError::InvalidPeriod)
        );
    }

    #[test]
    fn test_decay_level_bounds() {
        assert_eq!(
            DecayLevel::new(FixedPoint64x64::ONE),
            Err(NumericError::InvalidDecayRate)
        );
        assert_eq!(
            DecayLevel::new(FixedPoint64x64::ZERO),
            Err(NumericError::InvalidDecayRate)
        );
        assert!(DecayLevel::new(FixedPoint64x64::from_raw(1)).is_ok());
    }

    #[test]
    fn test_single_minute_period() {
        // With one period the level is just 1 - rate
        let level = level(0.5, 1).unwrap();
        assert_eq!(level.decode(), 0.5);
        assert_eq!(level.as_fixed().fractional_bits(), 0x7FFF_FFFF_FFFF_FFFF);
    }

    #[test]
    fn test_inverse_recovers_rate() {
        let period = PeriodMinutes::MONTH;
        let level = level(0.02, period.get()).unwrap();
        let rate = calculate_demurrage_rate(level, period).unwrap();
        assert!((rate.value() - 0.02).abs() < 1e-9, "got {}", rate);
    }

    #[test]
    fn test_inverse_full_decay_rejected() {
        let tiny = DecayLevel::new(FixedPoint64x64::from_raw(1)).unwrap();
        assert_eq!(
            calculate_demurrage_rate(tiny, PeriodMinutes::MONTH),
            Err(NumericError::InvalidDecayRate)
        );
    }

    proptest! {
        #[test]
        fn prop_level_strictly_decreases_with_rate(
            minutes in 1u64..600_000,
            low in 0.001f64..0.98,
            gap in 1e-6f64..0.01,
        ) {
            let a = level(low, minutes).unwrap();
            let b = level(low + gap, minutes).unwrap();
            prop_assert!(b < a, "rate {} -> {}, rate {} -> {}", low, a, low + gap, b);
        }

        #[test]
        fn prop_inverse_is_close(minutes in 1u64..600_000, rate in 0.001f64..0.9) {
            let period = PeriodMinutes::new(minutes).unwrap();
            let level = calculate_decay_level(DecayRate::new(rate).unwrap(), period).unwrap();
            let back = calculate_demurrage_rate(level, period).unwrap();
            prop_assert!((back.value() - rate).abs() < 1e-6, "{} -> {}", rate, back);
        }
    }
}
