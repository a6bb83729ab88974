//! Solidity ABI encoding and decoding
//!
//! Covers the static and dynamic types used by the claim-handler and token
//! contracts: `address`, `uint<N>`, `bool`, `bytes<N>`, `bytes`, `string`.
//!
//! # Example
//!
//! ```rust
//! use mth_sdk::abi::{encode_function_call, decode, function_selector, Token, ParamType};
//! use mth_primitives::{Address, U256};
//!
//! let selector = function_selector("approve(address,uint256)");
//! let data = encode_function_call(selector, &[Token::Address(Address::ZERO), Token::Uint(U256::from(1000))]);
//! assert_eq!(data.len(), 4 + 64);
//!
//! let return_data = [0u8; 32]; // From eth_call
//! let allowance = decode(&[ParamType::Uint(256)], &return_data).unwrap();
//! assert_eq!(allowance[0], Token::Uint(U256::zero()));
//! ```

mod decode;
mod encode;
mod types;

pub use decode::decode;
pub use encode::{encode, encode_function_call, function_selector, parse_type};
pub use types::{ParamType, Token};
