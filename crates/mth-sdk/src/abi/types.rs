//! ABI type definitions

use mth_primitives::{Address, U256};

/// Solidity ABI token (a typed value)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Address (20 bytes)
    Address(Address),
    /// Unsigned integer (8-256 bits)
    Uint(U256),
    /// Boolean
    Bool(bool),
    /// Fixed-size bytes (1-32)
    FixedBytes(Vec<u8>),
    /// Dynamic bytes
    Bytes(Vec<u8>),
    /// UTF-8 string
    String(String),
}

/// Solidity parameter types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// Address
    Address,
    /// Unsigned integer with bit size (8, 16, ..., 256)
    Uint(usize),
    /// Boolean
    Bool,
    /// Fixed-size bytes (size 1-32)
    FixedBytes(usize),
    /// Dynamic bytes
    Bytes,
    /// UTF-8 string
    String,
}

impl ParamType {
    /// Dynamic types are stored in the tail and referenced by offset
    pub fn is_dynamic(&self) -> bool {
        matches!(self, ParamType::Bytes | ParamType::String)
    }

    /// Canonical Solidity name, as used in function signatures
    pub fn solidity_name(&self) -> String {
        match self {
            ParamType::Address => "address".to_string(),
            ParamType::Uint(bits) => format!("uint{}", bits),
            ParamType::Bool => "bool".to_string(),
            ParamType::FixedBytes(size) => format!("bytes{}", size),
            ParamType::Bytes => "bytes".to_string(),
            ParamType::String => "string".to_string(),
        }
    }
}

impl Token {
    /// Get the type of this token
    pub fn type_of(&self) -> ParamType {
        match self {
            Token::Address(_) => ParamType::Address,
            Token::Uint(_) => ParamType::Uint(256),
            Token::Bool(_) => ParamType::Bool,
            Token::FixedBytes(b) => ParamType::FixedBytes(b.len()),
            Token::Bytes(_) => ParamType::Bytes,
            Token::String(_) => ParamType::String,
        }
    }

    /// Whether this token can be passed where `param_type` is expected
    pub fn matches(&self, param_type: &ParamType) -> bool {
        match (self, param_type) {
            (Token::Address(_), ParamType::Address)
            | (Token::Uint(_), ParamType::Uint(_))
            | (Token::Bool(_), ParamType::Bool)
            | (Token::Bytes(_), ParamType::Bytes)
            | (Token::String(_), ParamType::String) => true,
            (Token::FixedBytes(b), ParamType::FixedBytes(size)) => b.len() <= *size,
            _ => false,
        }
    }

    /// Unwrap an address token
    pub fn into_address(self) -> Option<Address> {
        match self {
            Token::Address(a) => Some(a),
            _ => None,
        }
    }

    /// Unwrap a uint token
    pub fn into_uint(self) -> Option<U256> {
        match self {
            Token::Uint(v) => Some(v),
            _ => None,
        }
    }

    /// Unwrap a bool token
    pub fn into_bool(self) -> Option<bool> {
        match self {
            Token::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Unwrap a fixed-bytes token
    pub fn into_fixed_bytes(self) -> Option<Vec<u8>> {
        match self {
            Token::FixedBytes(b) => Some(b),
            _ => None,
        }
    }

    /// Unwrap a string token
    pub fn into_string(self) -> Option<String> {
        match self {
            Token::String(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_type_is_dynamic() {
        assert!(!ParamType::Address.is_dynamic());
        assert!(!ParamType::Uint(256).is_dynamic());
        assert!(!ParamType::Bool.is_dynamic());
        assert!(!ParamType::FixedBytes(32).is_dynamic());

        assert!(ParamType::Bytes.is_dynamic());
        assert!(ParamType::String.is_dynamic());
    }

    #[test]
    fn test_solidity_name() {
        assert_eq!(ParamType::Uint(8).solidity_name(), "uint8");
        assert_eq!(ParamType::FixedBytes(32).solidity_name(), "bytes32");
        assert_eq!(ParamType::String.solidity_name(), "string");
    }

    #[test]
    fn test_token_matches() {
        assert!(Token::Uint(U256::one()).matches(&ParamType::Uint(8)));
        assert!(Token::FixedBytes(vec![1]).matches(&ParamType::FixedBytes(32)));
        assert!(!Token::FixedBytes(vec![0; 33]).matches(&ParamType::FixedBytes(32)));
        assert!(!Token::String("x".into()).matches(&ParamType::Bytes));
    }

    #[test]
    fn test_token_unwrap_helpers() {
        assert_eq!(Token::Uint(U256::from(7)).into_uint(), Some(U256::from(7)));
        assert_eq!(Token::Bool(true).into_uint(), None);
        assert_eq!(Token::Bool(true).into_bool(), Some(true));
        assert_eq!(Token::String("a".into()).into_string(), Some("a".to_string()));
        assert_eq!(Token::Address(Address::ZERO).into_address(), Some(Address::ZERO));
    }
}
