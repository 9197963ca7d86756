// ============================================================================
// Domain Models Module
// Demurrage rates, periods and decay levels, plus deployment configuration
// ============================================================================

pub mod config;
pub mod decay;

pub use config::{DemurrageConfig, DeploymentArgs};
pub use decay::{
    calculate_decay_level, calculate_demurrage_rate, DecayLevel, DecayRate, PeriodMinutes,
    MINUTES_PER_DAY, MINUTES_PER_MONTH, MINUTES_PER_YEAR,
};
