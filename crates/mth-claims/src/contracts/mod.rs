//! Contract proxies for the claim handler and the MTH token
//!
//! [`ClaimHandlerContract`] and [`TokenContract`] are the capabilities the
//! manager needs. Reads come back as named-field values ([`RawClaim`], plain
//! integers), so the manager does not care how a binding talks to the chain.
//! The bundled implementations decode positional ABI outputs and adapt them.

mod claim_handler;
mod token;

pub use claim_handler::{claim_handler_abi, MonethaClaimHandler};
pub use token::MonethaToken;

use async_trait::async_trait;
use mth_primitives::{Address, U256};
use mth_sdk::abi::Token;
use mth_sdk::{DeferredTransaction, SdkError};

/// Size of a `bytes32` value
pub const BYTES32_LEN: usize = 32;

/// Claim record as returned by the contract, before unit conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawClaim {
    /// Lifecycle state (contract enum value)
    pub state: u8,
    /// Last modification, UNIX seconds
    pub modified: U256,
    /// Deal id
    pub deal_id: U256,
    /// Deal hash passed at creation
    pub deal_hash: [u8; 32],
    /// Reason note
    pub reason_note: String,
    /// Requester id
    pub requester_id: String,
    /// Requester wallet
    pub requester_address: Address,
    /// Staked amount in base units
    pub requester_staked: U256,
    /// Respondent id
    pub respondent_id: String,
    /// Respondent wallet
    pub respondent_address: Address,
    /// Respondent's matched stake in base units
    pub respondent_staked: U256,
    /// Resolution note
    pub resolution_note: String,
}

impl RawClaim {
    /// Adapt the positional output of `claims(uint256)` into named fields
    pub fn from_tokens(tokens: Vec<Token>) -> Result<Self, SdkError> {
        let count = tokens.len();
        let mut fields = tokens.into_iter();
        let mut next = |name: &str| {
            fields.next().ok_or_else(|| {
                SdkError::AbiDecode(format!("claims(): expected 12 outputs, got {} ({} missing)", count, name))
            })
        };

        let state = next("state")?
            .into_uint()
            .filter(|v| *v <= U256::from(u8::MAX))
            .map(|v| v.as_u32() as u8)
            .ok_or_else(|| field_error("state"))?;
        let modified = uint(next("modified")?, "modified")?;
        let deal_id = uint(next("dealId")?, "dealId")?;
        let deal_hash = next("dealHash")?
            .into_fixed_bytes()
            .and_then(|b| <[u8; 32]>::try_from(b).ok())
            .ok_or_else(|| field_error("dealHash"))?;
        let reason_note = string(next("reasonNote")?, "reasonNote")?;
        let requester_id = bytes32_to_string(&bytes(next("requesterId")?, "requesterId")?);
        let requester_address = address(next("requesterAddress")?, "requesterAddress")?;
        let requester_staked = uint(next("requesterStaked")?, "requesterStaked")?;
        let respondent_id = bytes32_to_string(&bytes(next("respondentId")?, "respondentId")?);
        let respondent_address = address(next("respondentAddress")?, "respondentAddress")?;
        let respondent_staked = uint(next("respondentStaked")?, "respondentStaked")?;
        let resolution_note = string(next("resolutionNote")?, "resolutionNote")?;

        Ok(Self {
            state,
            modified,
            deal_id,
            deal_hash,
            reason_note,
            requester_id,
            requester_address,
            requester_staked,
            respondent_id,
            respondent_address,
            respondent_staked,
            resolution_note,
        })
    }
}

fn field_error(name: &str) -> SdkError {
    SdkError::AbiDecode(format!("claims(): unexpected type for {}", name))
}

fn uint(token: Token, name: &str) -> Result<U256, SdkError> {
    token.into_uint().ok_or_else(|| field_error(name))
}

fn string(token: Token, name: &str) -> Result<String, SdkError> {
    token.into_string().ok_or_else(|| field_error(name))
}

fn bytes(token: Token, name: &str) -> Result<Vec<u8>, SdkError> {
    token.into_fixed_bytes().ok_or_else(|| field_error(name))
}

fn address(token: Token, name: &str) -> Result<Address, SdkError> {
    token.into_address().ok_or_else(|| field_error(name))
}

/// UTF-8 string right-padded with zeros into a `bytes32`
pub fn string_to_bytes32(s: &str) -> Result<[u8; 32], SdkError> {
    if s.len() > BYTES32_LEN {
        return Err(SdkError::AbiEncode(format!(
            "{:?} is longer than {} bytes",
            s, BYTES32_LEN
        )));
    }
    let mut word = [0u8; 32];
    word[..s.len()].copy_from_slice(s.as_bytes());
    Ok(word)
}

/// Inverse of [`string_to_bytes32`]: trailing zero bytes are dropped.
///
/// Ids written by other clients need not be text; a word that is not UTF-8
/// comes back as its full 0x-hex form.
pub fn bytes32_to_string(word: &[u8]) -> String {
    let end = word.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
    match std::str::from_utf8(&word[..end]) {
        Ok(text) => text.to_string(),
        Err(_) => format!("0x{}", hex::encode(word)),
    }
}

/// Dispute handler contract
#[async_trait]
pub trait ClaimHandlerContract: Send + Sync {
    /// Deployed address
    fn address(&self) -> Address;

    /// Prepare `create`: opens a dispute and stakes `amount_to_stake` base units
    fn create_tx(
        &self,
        deal_id: u64,
        deal_hash: [u8; 32],
        reason_note: &str,
        requester_id: &str,
        respondent_id: &str,
        amount_to_stake: U256,
    ) -> Result<DeferredTransaction, SdkError>;

    /// Prepare `accept`
    fn accept_tx(&self, claim_id: u64) -> Result<DeferredTransaction, SdkError>;

    /// Prepare `resolve`
    fn resolve_tx(&self, claim_id: u64, resolution_note: &str) -> Result<DeferredTransaction, SdkError>;

    /// Prepare `close`
    fn close_tx(&self, claim_id: u64) -> Result<DeferredTransaction, SdkError>;

    /// Read a claim record
    async fn claim(&self, claim_id: u64) -> Result<RawClaim, SdkError>;

    /// Minimum stake in base units
    async fn min_stake(&self) -> Result<U256, SdkError>;

    /// Number of claims ever created
    async fn claims_count(&self) -> Result<U256, SdkError>;
}

/// ERC-20 token used for staking
#[async_trait]
pub trait TokenContract: Send + Sync {
    /// Deployed address
    fn address(&self) -> Address;

    /// Prepare `approve(spender, value)`
    fn approve_tx(&self, spender: Address, value: U256) -> Result<DeferredTransaction, SdkError>;

    /// Current allowance of `spender` over `owner`'s balance, in base units
    async fn allowance(&self, owner: Address, spender: Address) -> Result<U256, SdkError>;

    /// Token decimals as reported by the contract
    async fn decimals(&self) -> Result<u8, SdkError>;
}
