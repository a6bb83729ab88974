//! # mth-claims
//!
//! Client SDK for Monetha's decentralized dispute (claim) handling.
//!
//! A requester opens a dispute over a deal by staking MTH tokens; the
//! respondent accepts it by matching the stake and resolves it; the requester
//! then closes it. [`ClaimManager`] prepares each of those contract calls as an
//! unsent [`DeferredTransaction`], reads claims back in human-facing form, and
//! manages the token allowance the claim handler needs.
//!
//! ## Opening a dispute
//!
//! ```rust,no_run
//! use mth_claims::{ClaimManager, ClaimManagerOptions, CreateClaimPayload, EthClient, TokenAmount};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = ClaimManager::new(ClaimManagerOptions {
//!         transport: Some(EthClient::http("http://localhost:8545")),
//!         claims_handler_contract_address: Some("0x1111111111111111111111111111111111111111".into()),
//!         monetha_token_contract_address: Some("0x2222222222222222222222222222222222222222".into()),
//!         token_decimals: None,
//!     })?;
//!
//!     let tokens: TokenAmount = "150".parse()?;
//!     let approve = manager.allow_tx(&tokens)?;
//!     let create = manager.create_tx(&CreateClaimPayload {
//!         deal_id: 123,
//!         reason: "I have received a defected product".into(),
//!         requester_id: "user-1".into(),
//!         respondent_id: "user-2".into(),
//!         tokens,
//!     })?;
//!
//!     // sign and send `approve`, then `create`, with your own signer
//!     println!("{} {}", approve.encode_abi(), create.encode_abi());
//!
//!     Ok(())
//! }
//! ```
//!
//! After the `create` transaction is mined, [`extract_claim_id`] recovers the
//! new claim's id from its receipt.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
pub mod contracts;
mod conversion;
mod error;
mod manager;
mod models;
mod receipt;
pub mod validation;

pub use config::{ClaimManagerOptions, ClaimsConfig};
pub use conversion::{TokenAmount, TokenConverter, MTH_DECIMALS};
pub use error::ClaimsError;
pub use manager::{ClaimManager, DEAL_HASH_MARKER};
pub use models::{Claim, ClaimStatus, CreateClaimPayload};
pub use receipt::extract_claim_id;

// Re-export SDK types that appear in the public API
pub use mth_sdk::{DeferredTransaction, EthClient};
