// ============================================================================
// Hex Interchange
// Hex strings and ABI words for 64.64 fixed-point values
// ============================================================================
//
// Interchange format:
// - optional "0x" / "0X" prefix
// - big-endian, unsigned
// - odd digit counts are left-padded with a single '0'
// - at least 16 hex digits (one full 64-bit fraction field)

use super::errors::{NumericError, NumericResult};
use super::fixed_point::FixedPoint64x64;

/// Minimum hex digits accepted: enough to hold the 64 fractional bits
pub const MIN_HEX_DIGITS: usize = 16;

/// Size of an ABI-encoded `uint256` word
pub const ABI_WORD_BYTES: usize = 32;

const RAW_BYTES: usize = std::mem::size_of::<u128>();

/// Parse a hex string into a fixed-point value.
///
/// # Errors
/// - `Format` if fewer than 16 hex digits remain after normalisation, or the
///   string contains non-hex characters
/// - `Overflow` if the value needs more than 128 bits
pub fn parse_hex(input: &str) -> NumericResult<FixedPoint64x64> {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);

    let padded;
    let digits = if digits.len() % 2 == 1 {
        padded = format!("0{digits}");
        padded.as_str()
    } else {
        digits
    };

    if digits.len() < MIN_HEX_DIGITS {
        return Err(NumericError::Format);
    }

    let bytes = hex::decode(digits).map_err(|_| NumericError::Format)?;

    let first_significant = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    let significant = &bytes[first_significant..];
    if significant.len() > RAW_BYTES {
        return Err(NumericError::Overflow);
    }

    let mut buf = [0u8; RAW_BYTES];
    buf[RAW_BYTES - significant.len()..].copy_from_slice(significant);

    Ok(FixedPoint64x64::from_raw(u128::from_be_bytes(buf)))
}

/// Decode a hex string straight to a real number.
///
/// # Errors
/// Same as [`parse_hex`].
pub fn decode_hex(input: &str) -> NumericResult<f64> {
    parse_hex(input).map(FixedPoint64x64::decode)
}

impl FixedPoint64x64 {
    /// Minimal lower-case hex with a `0x` prefix.
    pub fn to_hex_string(self) -> String {
        format!("{:#x}", self.raw_value())
    }

    /// Full-width 32-digit lower-case hex, no prefix. Always accepted by
    /// [`parse_hex`].
    pub fn to_padded_hex(self) -> String {
        hex::encode(self.raw_value().to_be_bytes())
    }

    /// Big-endian `uint256` word for a contract constructor argument.
    pub fn to_abi_word(self) -> [u8; ABI_WORD_BYTES] {
        let mut word = [0u8; ABI_WORD_BYTES];
        word[ABI_WORD_BYTES - RAW_BYTES..].copy_from_slice(&self.raw_value().to_be_bytes());
        word
    }

    /// Read a value back from a `uint256` word.
    ///
    /// # Errors
    /// Returns `Overflow` if any of the high 16 bytes are set.
    pub fn from_abi_word(word: &[u8; ABI_WORD_BYTES]) -> NumericResult<Self> {
        let (high, low) = word.split_at(ABI_WORD_BYTES - RAW_BYTES);
        if high.iter().any(|b| *b != 0) {
            return Err(NumericError::Overflow);
        }

        let mut buf = [0u8; RAW_BYTES];
        buf.copy_from_slice(low);
        Ok(Self::from_raw(u128::from_be_bytes(buf)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use quickcheck::quickcheck;

    type FP = FixedPoint64x64;

    const RAWS: [u128; 4] = [
        2_277_361_236_363_886_404_607,
        18_446_744_073_709_551_616,
        18_445_350_318_893_015_039,
        18_446_735_565_168_785_407,
    ];

    #[test]
    fn test_decode_hex_matches_decode() {
        for raw in RAWS {
            let fixed = FP::from_raw(raw);
            let bare = format!("{:x}", raw);
            assert_eq!(decode_hex(&bare).unwrap(), fixed.decode());
            assert_eq!(decode_hex(&format!("0x{}", bare)).unwrap(), fixed.decode());
        }
    }

    #[test]
    fn test_odd_length_is_padded() {
        // 2^64 has 17 hex digits
        let hex = format!("{:x}", 1u128 << 64);
        assert_eq!(hex.len(), 17);
        assert_eq!(parse_hex(&hex).unwrap(), FP::ONE);
        assert_eq!(decode_hex(&hex).unwrap(), 1.0);
    }

    #[test]
    fn test_upper_case_and_prefix() {
        assert_eq!(
            parse_hex("0XFFFB0C632B419FFF").unwrap().raw_value(),
            18_445_350_318_893_015_039
        );
    }

    #[test]
    fn test_too_short() {
        assert_eq!(parse_hex("0x1"), Err(NumericError::Format));
        assert_eq!(parse_hex("ffffffffffffff"), Err(NumericError::Format));
        assert_eq!(decode_hex(""), Err(NumericError::Format));
        // 15 digits pads to 16 and is accepted
        assert!(parse_hex("fffffffffffffff").is_ok());
    }

    #[test]
    fn test_invalid_digits() {
        assert_eq!(parse_hex("0xzz00000000000000"), Err(NumericError::Format));
        assert_eq!(parse_hex("0x 000000000000000"), Err(NumericError::Format));
    }

    #[test]
    fn test_overflow() {
        let too_wide = format!("01{}", "00".repeat(16));
        assert_eq!(parse_hex(&too_wide), Err(NumericError::Overflow));

        // Leading zero bytes beyond 128 bits are fine
        let zero_led = format!("{}{}", "00".repeat(8), FP::ONE.to_padded_hex());
        assert_eq!(parse_hex(&zero_led).unwrap(), FP::ONE);
    }

    #[test]
    fn test_to_hex_string() {
        assert_eq!(FP::ONE.to_hex_string(), "0x10000000000000000");
        assert_eq!(FP::ONE.to_padded_hex(), "00000000000000010000000000000000");
        assert_eq!(FP::ZERO.to_padded_hex().len(), 32);
    }

    #[test]
    fn test_abi_word() {
        let level = FP::from_raw(18_446_735_565_168_785_407);
        let word = level.to_abi_word();
        assert!(word[..16].iter().all(|b| *b == 0));
        assert_eq!(FP::from_abi_word(&word).unwrap(), level);

        let mut dirty = word;
        dirty[0] = 1;
        assert_eq!(FP::from_abi_word(&dirty), Err(NumericError::Overflow));
    }

    proptest! {
        #[test]
        fn prop_padded_hex_round_trip(raw in any::<u128>()) {
            let fixed = FP::from_raw(raw);
            prop_assert_eq!(parse_hex(&fixed.to_padded_hex()).unwrap(), fixed);
            prop_assert_eq!(decode_hex(&fixed.to_padded_hex()).unwrap(), fixed.decode());
        }
    }

    quickcheck! {
        fn qc_prefix_is_optional(raw: u128) -> bool {
            let hex = FP::from_raw(raw).to_padded_hex();
            parse_hex(&hex) == parse_hex(&format!("0x{}", hex))
        }
    }
}
