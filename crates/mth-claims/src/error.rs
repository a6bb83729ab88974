//! Claims SDK error types

use mth_sdk::SdkError;
use thiserror::Error;

/// Claims SDK error type
#[derive(Debug, Error)]
pub enum ClaimsError {
    /// A required argument was missing or empty
    #[error("\"{name}\" cannot be empty")]
    EmptyValue {
        /// Parameter name
        name: String,
    },

    /// A string or sequence argument is longer than allowed
    #[error("\"{name}\" must not be longer than {max_length}")]
    LengthExceeded {
        /// Parameter name
        name: String,
        /// Allowed maximum
        max_length: usize,
    },

    /// Receipt does not carry a claim-creation event
    #[error("Receipt is not a valid claim creation receipt: {0}")]
    InvalidReceipt(String),

    /// Unparseable token amount
    #[error("Invalid token amount: {0}")]
    InvalidAmount(String),

    /// Token amount does not fit in uint256 once scaled
    #[error("Token amount overflows uint256")]
    AmountOverflow,

    /// Malformed address argument
    #[error("Invalid address for \"{name}\": {reason}")]
    InvalidAddress {
        /// Parameter name
        name: String,
        /// Parse failure
        reason: String,
    },

    /// Contract returned a state outside the known lifecycle
    #[error("Unknown claim status: {0}")]
    UnknownClaimStatus(u8),

    /// Configured token decimals differ from the deployed token
    #[error("Token decimals mismatch: configured {configured}, contract reports {on_chain}")]
    DecimalsMismatch {
        /// Decimals the converter uses
        configured: u32,
        /// Decimals reported by the token contract
        on_chain: u32,
    },

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport, RPC or ABI error, passed through unchanged
    #[error(transparent)]
    Sdk(#[from] SdkError),
}

impl ClaimsError {
    pub(crate) fn empty(name: &str) -> Self {
        ClaimsError::EmptyValue {
            name: name.to_string(),
        }
    }
}
