//! Token amounts and fixed-point conversion
//!
//! Human-facing amounts are exact decimals ([`TokenAmount`]); on-chain amounts
//! are integers in the token's smallest unit. [`TokenConverter`] scales between
//! the two by `10^decimals` without any floating-point step.

use mth_primitives::U256;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::validation::Presence;
use crate::ClaimsError;

/// Decimal places of the MTH token
pub const MTH_DECIMALS: u32 = 5;

/// Largest power of ten that fits in a U256
const MAX_SCALE: u32 = 77;

/// Exact non-negative decimal amount of tokens, e.g. `150` or `0.25`.
///
/// Serialized as a decimal string. Deserializes from a decimal string or a
/// non-negative integer; floating-point numbers are rejected.
///
/// Stored as `mantissa / 10^scale` with trailing zeros stripped, so equal
/// values compare equal regardless of how they were written.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TokenAmount {
    mantissa: U256,
    scale: u32,
}

impl TokenAmount {
    /// Zero tokens
    pub fn zero() -> Self {
        Self::default()
    }

    pub(crate) fn new(mut mantissa: U256, mut scale: u32) -> Self {
        let ten = U256::from(10u8);
        if mantissa.is_zero() {
            return Self::zero();
        }
        while scale > 0 && (mantissa % ten).is_zero() {
            mantissa /= ten;
            scale -= 1;
        }
        Self { mantissa, scale }
    }

    /// Digits of the amount without the decimal point
    pub fn mantissa(&self) -> U256 {
        self.mantissa
    }

    /// Number of fractional digits
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// True for zero tokens
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }
}

impl From<u64> for TokenAmount {
    fn from(value: u64) -> Self {
        Self::new(U256::from(value), 0)
    }
}

impl FromStr for TokenAmount {
    type Err = ClaimsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ClaimsError::InvalidAmount(s.to_string());
        let trimmed = s.trim();

        let (int_part, frac_part) = match trimmed.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (trimmed, ""),
        };
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if int_part.is_empty() || !all_digits(int_part) || !all_digits(frac_part) {
            return Err(invalid());
        }
        if trimmed.ends_with('.') {
            return Err(invalid());
        }

        let scale = u32::try_from(frac_part.len()).map_err(|_| invalid())?;
        if scale > MAX_SCALE {
            return Err(ClaimsError::InvalidAmount(format!(
                "{}: more than {} fractional digits",
                s, MAX_SCALE
            )));
        }

        let digits = format!("{}{}", int_part, frac_part);
        let mantissa = U256::from_dec_str(&digits).map_err(|_| ClaimsError::AmountOverflow)?;
        Ok(Self::new(mantissa, scale))
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.mantissa.to_string();
        let scale = self.scale as usize;
        if scale == 0 {
            return f.write_str(&digits);
        }

        let padded = format!("{:0>width$}", digits, width = scale + 1);
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{}.{}", int_part, frac_part)
    }
}

impl fmt::Debug for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenAmount({})", self)
    }
}

impl Presence for TokenAmount {
    fn is_blank(&self) -> bool {
        false
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AmountVisitor;

        impl de::Visitor<'_> for AmountVisitor {
            type Value = TokenAmount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-negative decimal string or integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<TokenAmount, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<TokenAmount, E> {
                Ok(TokenAmount::from(v))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<TokenAmount, E> {
                Err(E::custom(ClaimsError::InvalidAmount(format!(
                    "{}: fractional amounts must be given as decimal strings, e.g. \"{}\"",
                    v, v
                ))))
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}

/// Scales amounts between human decimals and the token's on-chain integers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenConverter {
    decimals: u32,
}

impl Default for TokenConverter {
    fn default() -> Self {
        Self {
            decimals: MTH_DECIMALS,
        }
    }
}

impl TokenConverter {
    /// Converter for a token with `decimals` fractional digits
    pub fn new(decimals: u32) -> Result<Self, ClaimsError> {
        if decimals > MAX_SCALE {
            return Err(ClaimsError::Config(format!(
                "token decimals must be at most {}, got {}",
                MAX_SCALE, decimals
            )));
        }
        Ok(Self { decimals })
    }

    /// Decimal places of the token
    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// On-chain integer amount to human decimal (`raw / 10^decimals`)
    pub fn to_float(&self, raw: U256) -> TokenAmount {
        TokenAmount::new(raw, self.decimals)
    }

    /// Human decimal to on-chain integer (`amount * 10^decimals`).
    ///
    /// Digits below the token's smallest unit are truncated.
    pub fn to_blockchain(&self, amount: &TokenAmount) -> Result<U256, ClaimsError> {
        if amount.scale <= self.decimals {
            let factor = U256::exp10((self.decimals - amount.scale) as usize);
            return amount
                .mantissa
                .checked_mul(factor)
                .ok_or(ClaimsError::AmountOverflow);
        }

        let divisor = U256::exp10((amount.scale - self.decimals) as usize);
        let (raw, remainder) = amount.mantissa.div_mod(divisor);
        if !remainder.is_zero() {
            tracing::warn!(
                amount = %amount,
                decimals = self.decimals,
                "token amount has more precision than the token; truncating"
            );
        }
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn amount(s: &str) -> TokenAmount {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(amount("150").to_string(), "150");
        assert_eq!(amount("150.50").to_string(), "150.5");
        assert_eq!(amount("0.00015").to_string(), "0.00015");
        assert_eq!(amount("007").to_string(), "7");
        assert_eq!(amount("0.0").to_string(), "0");
        assert_eq!(amount(" 12.5 ").to_string(), "12.5");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "-1", "+1", "1.2.3", "abc", ".5", "5.", "1e5", "1,5"] {
            assert!(
                matches!(bad.parse::<TokenAmount>(), Err(ClaimsError::InvalidAmount(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_parse_overflow() {
        let huge = "1".repeat(100);
        assert!(matches!(huge.parse::<TokenAmount>(), Err(ClaimsError::AmountOverflow)));
    }

    #[test]
    fn test_equality_ignores_trailing_zeros() {
        assert_eq!(amount("150.000"), TokenAmount::from(150));
        assert_eq!(amount("1.10"), amount("1.1"));
        assert_ne!(amount("1.01"), amount("1.1"));
    }

    #[test]
    fn test_to_float() {
        let converter = TokenConverter::new(4).unwrap();
        assert_eq!(converter.to_float(U256::from(1_500_000)), TokenAmount::from(150));
        assert_eq!(converter.to_float(U256::from(15)), amount("0.0015"));
        assert_eq!(converter.to_float(U256::zero()), TokenAmount::zero());
    }

    #[test]
    fn test_to_blockchain() {
        let converter = TokenConverter::new(4).unwrap();
        assert_eq!(converter.to_blockchain(&TokenAmount::from(150)).unwrap(), U256::from(1_500_000));
        assert_eq!(converter.to_blockchain(&amount("0.0001")).unwrap(), U256::one());
        assert_eq!(converter.to_blockchain(&TokenAmount::zero()).unwrap(), U256::zero());
    }

    #[test]
    fn test_to_blockchain_truncates_excess_precision() {
        let converter = TokenConverter::new(2).unwrap();
        assert_eq!(converter.to_blockchain(&amount("1.239")).unwrap(), U256::from(123));
    }

    #[test]
    fn test_to_blockchain_overflow() {
        let converter = TokenConverter::new(18).unwrap();
        let max = TokenAmount::new(U256::MAX, 0);
        assert!(matches!(converter.to_blockchain(&max), Err(ClaimsError::AmountOverflow)));
    }

    #[test]
    fn test_default_is_mth() {
        assert_eq!(TokenConverter::default().decimals(), MTH_DECIMALS);
        // 150 MTH is 15,000,000 base units
        assert_eq!(
            TokenConverter::default().to_blockchain(&TokenAmount::from(150)).unwrap(),
            U256::from(15_000_000)
        );
    }

    #[test]
    fn test_converter_rejects_unrepresentable_decimals() {
        assert!(TokenConverter::new(77).is_ok());
        assert!(matches!(TokenConverter::new(78), Err(ClaimsError::Config(_))));
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&amount("150.25")).unwrap();
        assert_eq!(json, "\"150.25\"");

        let from_str: TokenAmount = serde_json::from_str("\"0.5\"").unwrap();
        let from_int: TokenAmount = serde_json::from_str("150").unwrap();
        assert_eq!(from_str, amount("0.5"));
        assert_eq!(from_int, TokenAmount::from(150));
        assert!(serde_json::from_str::<TokenAmount>("-1").is_err());
    }

    #[test]
    fn test_serde_rejects_float_with_hint() {
        let err = serde_json::from_str::<TokenAmount>("150.5").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Invalid token amount"), "{}", message);
        assert!(message.contains("\"150.5\""), "{}", message);
    }

    proptest! {
        #[test]
        fn prop_round_trip_within_decimals(
            int_part in 0u64..1_000_000_000_000,
            frac in 0u32..100_000,
            decimals in 5u32..=18,
        ) {
            let converter = TokenConverter::new(decimals).unwrap();
            let x: TokenAmount = format!("{}.{:05}", int_part, frac).parse().unwrap();

            let raw = converter.to_blockchain(&x).unwrap();
            prop_assert_eq!(converter.to_float(raw), x);
        }

        #[test]
        fn prop_raw_round_trip(raw in any::<u128>(), decimals in 0u32..=30) {
            let converter = TokenConverter::new(decimals).unwrap();
            let raw = U256::from(raw);
            prop_assert_eq!(converter.to_blockchain(&converter.to_float(raw)).unwrap(), raw);
        }
    }
}
