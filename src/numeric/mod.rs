// ============================================================================
// Numeric Module
// 64.64 fixed-point codec for demurrage token arguments
// ============================================================================
//
// This module provides:
// - FixedPoint64x64: unsigned 64.64 fixed-point value (the contract's wire format)
// - encode / decode between real numbers and the packed integer
// - Hex and ABI-word interchange
// - NumericError: Error types for codec operations
//
// Design principles:
// - Bit-exact with the on-chain unpacking; never "improve" the rounding
// - Encoding starts from decimal digits, not binary float bits
// - All fallible operations return Result (no panics on caller input)

mod errors;
mod fixed_point;
mod interchange;

pub use errors::{NumericError, NumericResult};
pub use fixed_point::FixedPoint64x64;
pub use interchange::{decode_hex, parse_hex, ABI_WORD_BYTES, MIN_HEX_DIGITS};
