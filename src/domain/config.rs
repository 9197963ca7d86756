// ============================================================================
// Demurrage Configuration
// Human-entered demurrage settings and the constructor arguments derived from them
// ============================================================================

use super::decay::{
    calculate_decay_level, DecayLevel, DecayRate, PeriodMinutes, MINUTES_PER_MONTH,
    MINUTES_PER_YEAR,
};
use crate::numeric::{NumericError, NumericResult, ABI_WORD_BYTES};
use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Configuration
// ============================================================================

/// Demurrage settings for one token deployment
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DemurrageConfig {
    /// Total fraction lost over the period (e.g. 0.02 for 2%)
    pub demurrage_rate: Decimal,

    /// Minutes over which the total rate is realised.
    /// Fixed for the lifetime of the deployed token.
    pub period_minutes: u64,
}

impl DemurrageConfig {
    /// Create a new configuration with required parameters
    pub fn new(demurrage_rate: Decimal, period_minutes: u64) -> Self {
        Self {
            demurrage_rate,
            period_minutes,
        }
    }

    /// Builder method: Set the period in whole days
    ///
    /// # Errors
    /// Same as [`PeriodMinutes::from_days`].
    pub fn with_period_days(mut self, days: u64) -> NumericResult<Self> {
        self.period_minutes = PeriodMinutes::from_days(days)?.get();
        Ok(self)
    }

    /// Validate the configuration
    ///
    /// Checks the rate range and period only; a rate that is valid but too
    /// small to register still fails later in [`Self::decay_level`].
    pub fn validate(&self) -> NumericResult<()> {
        if self.demurrage_rate < Decimal::ZERO || self.demurrage_rate >= Decimal::ONE {
            return Err(NumericError::InvalidDecayRate);
        }

        if self.period_minutes == 0 {
            return Err(NumericError::InvalidPeriod);
        }

        Ok(())
    }

    /// Typed rate
    pub fn rate(&self) -> NumericResult<DecayRate> {
        DecayRate::from_decimal(self.demurrage_rate)
    }

    /// Typed period
    pub fn period(&self) -> NumericResult<PeriodMinutes> {
        PeriodMinutes::new(self.period_minutes)
    }

    /// Per-minute decay level for this configuration
    pub fn decay_level(&self) -> NumericResult<DecayLevel> {
        self.validate()?;
        calculate_decay_level(self.rate()?, self.period()?)
    }

    /// Constructor arguments for the demurrage token
    pub fn deployment_args(&self) -> NumericResult<DeploymentArgs> {
        let decay_level = self.decay_level()?;
        let period_minutes = self.period()?;

        tracing::debug!(
            rate = %self.demurrage_rate,
            period_mins = self.period_minutes,
            decay_level = %decay_level,
            "prepared demurrage deployment arguments"
        );

        Ok(DeploymentArgs {
            decay_level,
            period_minutes,
        })
    }
}

#[cfg(feature = "serde")]
impl DemurrageConfig {
    /// Load a configuration from JSON, e.g.
    /// `{"demurrage_rate": "0.02", "period_minutes": 43800}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl DemurrageConfig {
    /// Rate realised over one average month (43,800 minutes)
    pub fn monthly(demurrage_rate: Decimal) -> Self {
        Self::new(demurrage_rate, MINUTES_PER_MONTH)
    }

    /// Rate realised over a 365-day year
    pub fn yearly(demurrage_rate: Decimal) -> Self {
        Self::new(demurrage_rate, MINUTES_PER_YEAR)
    }
}

// ============================================================================
// Deployment Arguments
// ============================================================================

/// Demurrage parameters as passed to the token constructor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DeploymentArgs {
    pub decay_level: DecayLevel,
    pub period_minutes: PeriodMinutes,
}

impl DeploymentArgs {
    /// `uint256` words in constructor order: decay level, then period.
    pub fn abi_words(&self) -> [[u8; ABI_WORD_BYTES]; 2] {
        let mut period = [0u8; ABI_WORD_BYTES];
        period[ABI_WORD_BYTES - 8..].copy_from_slice(&self.period_minutes.get().to_be_bytes());

        [self.decay_level.to_abi_word(), period]
    }
}
