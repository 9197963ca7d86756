// ============================================================================
// Demurrage Codec Library
// Bit-exact 64.64 fixed-point codec and decay-level calculator
// ============================================================================

//! # Demurrage Codec
//!
//! Converts human-specified demurrage rates into the 64.64 fixed-point decay
//! level a demurrage token contract takes as its constructor argument, and
//! back.
//!
//! ## Features
//!
//! - **Bit-exact encoding** matching the contract's fixed-point unpacking
//! - **Decimal-first**: rates are encoded from their decimal digits, so `0.02`
//!   means the rate a person typed
//! - **Hex and ABI-word interchange** for constructor arguments
//! - **Typed values**: rates, periods and decay levels cannot be mixed up
//!
//! ## Example
//!
//! ```rust
//! use demurrage_codec::prelude::*;
//!
//! // 2% lost over one month
//! let level = calculate_decay_level(
//!     DecayRate::new(0.02).unwrap(),
//!     PeriodMinutes::MONTH,
//! )
//! .unwrap();
//!
//! assert_eq!(level.raw_value(), 18_446_735_565_168_785_407);
//! println!("decay level: {}", level);
//! println!("as hex:      {}", level.as_fixed().to_hex_string());
//! ```

pub mod domain;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        calculate_decay_level, calculate_demurrage_rate, DecayLevel, DecayRate, DemurrageConfig,
        DeploymentArgs, PeriodMinutes,
    };
    pub use crate::numeric::{decode_hex, parse_hex, FixedPoint64x64, NumericError, NumericResult};
}
