//! # mth-sdk
//!
//! Ethereum plumbing for the Monetha claims SDK.
//!
//! ## Features
//!
//! - **EthClient**: JSON-RPC client over a pluggable [`Transport`]
//! - **ABI**: Solidity ABI encoding and decoding
//! - **Contract**: contract interfaces, bound read calls and unsent
//!   [`DeferredTransaction`]s
//!
//! ## Preparing a call
//!
//! ```rust,no_run
//! use mth_sdk::{abi::Token, contract, BoundContract, EthClient};
//! use mth_primitives::{Address, U256};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EthClient::http("http://localhost:8545");
//!
//!     let token = Address::from_hex("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48")?;
//!     let spender = Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d")?;
//!     let bound = BoundContract::new(contract::erc20(token), client);
//!
//!     let tx = bound.transaction("approve", &[Token::Address(spender), Token::Uint(U256::from(1000))])?;
//!     println!("to={} data={} gas={}", tx.contract_address(), tx.encode_abi(), tx.estimate_gas(None).await?);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod abi;
mod client;
pub mod contract;
mod error;
mod transport;
pub mod types;

// Re-export main types
pub use client::EthClient;
pub use contract::{BoundContract, DeferredTransaction};
pub use error::SdkError;
pub use transport::{MockTransport, RecordedRequest};

/// Re-export Transport trait for custom implementations
pub use transport::Transport;

#[cfg(feature = "http")]
pub use transport::HttpTransport;

// Re-export primitives for convenience
pub use mth_primitives::{Address, H256, U256};
