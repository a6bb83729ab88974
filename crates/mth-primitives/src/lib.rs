//! # mth-primitives
//!
//! Primitive Ethereum types shared by the Monetha claims SDK crates.
//!
//! Addresses and 32-byte words are fixed-size newtypes with hex parsing;
//! `U256` comes straight from `primitive-types`.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod error;
mod hash;

pub use address::{Address, AddressError};
pub use error::PrimitiveError;
pub use hash::{HashError, H256};

// Re-export primitive-types for U256
pub use primitive_types::U256;

/// Parse a hex quantity (`0x`-prefixed or bare) into a `U256`.
///
/// Unlike [`H256::from_hex`], shorter inputs are accepted, so `"0x7b"` parses as 123.
pub fn parse_u256_hex(s: &str) -> Result<U256, PrimitiveError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    if digits.is_empty() || digits.len() > 64 {
        return Err(PrimitiveError::InvalidQuantity(s.to_string()));
    }
    U256::from_str_radix(digits, 16).map_err(|_| PrimitiveError::InvalidQuantity(s.to_string()))
}
