//! ClaimManager - dispute operations over the claim-handler and token contracts

use mth_primitives::{Address, U256};
use mth_sdk::{DeferredTransaction, SdkError};
use std::fmt;
use std::sync::Arc;

use crate::config::ClaimManagerOptions;
#[cfg(feature = "http")]
use crate::config::ClaimsConfig;
use crate::contracts::{
    ClaimHandlerContract, MonethaClaimHandler, MonethaToken, RawClaim, TokenContract, BYTES32_LEN,
};
use crate::conversion::{TokenAmount, TokenConverter};
use crate::models::{Claim, ClaimStatus, CreateClaimPayload};
use crate::validation::{validate_max_length, validate_not_empty};
use crate::ClaimsError;

/// `dealHash` value sent with every `create` call
pub const DEAL_HASH_MARKER: [u8; 32] = {
    let mut marker = [0u8; 32];
    marker[0] = 0x01;
    marker
};

const MODIFIED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Entry point of the SDK: prepares dispute transactions and reads claims.
///
/// Transaction methods are synchronous and only describe a call; signing and
/// broadcasting the returned [`DeferredTransaction`] is up to the caller. The
/// two contract bindings are immutable after construction, so a manager can be
/// cloned and shared across tasks.
#[derive(Clone)]
pub struct ClaimManager {
    claim_handler: Arc<dyn ClaimHandlerContract>,
    token: Arc<dyn TokenContract>,
    converter: TokenConverter,
}

impl fmt::Debug for ClaimManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaimManager")
            .field("claim_handler", &self.claim_handler.address())
            .field("token", &self.token.address())
            .field("decimals", &self.converter.decimals())
            .finish()
    }
}

impl ClaimManager {
    /// Bind both contracts at the configured addresses
    pub fn new(options: ClaimManagerOptions) -> Result<Self, ClaimsError> {
        let client = options
            .transport
            .ok_or_else(|| ClaimsError::empty("options.web3"))?;
        let handler_address = required_address(
            options.claims_handler_contract_address.as_deref(),
            "options.claimsHandlerContractAddress",
        )?;
        let token_address = required_address(
            options.monetha_token_contract_address.as_deref(),
            "options.monethaTokenContractAddress",
        )?;
        let converter = match options.token_decimals {
            Some(decimals) => TokenConverter::new(decimals)?,
            None => TokenConverter::default(),
        };

        tracing::debug!(
            claim_handler = %handler_address,
            token = %token_address,
            decimals = converter.decimals(),
            "claim manager created"
        );

        Ok(Self::with_contracts(
            Arc::new(MonethaClaimHandler::new(handler_address, client.clone())),
            Arc::new(MonethaToken::new(token_address, client)),
            converter,
        ))
    }

    /// Build from caller-supplied contract bindings
    pub fn with_contracts(
        claim_handler: Arc<dyn ClaimHandlerContract>,
        token: Arc<dyn TokenContract>,
        converter: TokenConverter,
    ) -> Self {
        Self {
            claim_handler,
            token,
            converter,
        }
    }

    /// Connect over HTTP using a configuration file's settings
    #[cfg(feature = "http")]
    pub fn connect(config: &ClaimsConfig) -> Result<Self, ClaimsError> {
        let client = mth_sdk::EthClient::http(&config.rpc_url);
        Self::new(config.clone().into_options(client))
    }

    /// Claim-handler binding
    pub fn claim_handler(&self) -> &dyn ClaimHandlerContract {
        self.claim_handler.as_ref()
    }

    /// Token binding
    pub fn token(&self) -> &dyn TokenContract {
        self.token.as_ref()
    }

    /// Amount converter in use
    pub fn converter(&self) -> &TokenConverter {
        &self.converter
    }

    /// Prepare a `create` call opening a dispute and staking `payload.tokens`.
    ///
    /// The requester must have approved at least that amount for the claim
    /// handler beforehand (see [`allow_tx`](Self::allow_tx)).
    pub fn create_tx(&self, payload: &CreateClaimPayload) -> Result<DeferredTransaction, ClaimsError> {
        validate_not_empty(&payload.deal_id, "payload.dealId")?;
        validate_not_empty(&payload.reason, "payload.reason")?;
        validate_not_empty(&payload.requester_id, "payload.requesterId")?;
        validate_not_empty(&payload.respondent_id, "payload.respondentId")?;
        validate_not_empty(&payload.tokens, "payload.tokens")?;
        validate_max_length(&payload.requester_id, BYTES32_LEN, "payload.requesterId")?;
        validate_max_length(&payload.respondent_id, BYTES32_LEN, "payload.respondentId")?;

        let amount = self.converter.to_blockchain(&payload.tokens)?;
        tracing::debug!(deal_id = payload.deal_id, tokens = %payload.tokens, "preparing create");

        Ok(self.claim_handler.create_tx(
            payload.deal_id,
            DEAL_HASH_MARKER,
            &payload.reason,
            &payload.requester_id,
            &payload.respondent_id,
            amount,
        )?)
    }

    /// Prepare an `accept` call (respondent matches the stake)
    pub fn accept_tx(&self, claim_id: u64) -> Result<DeferredTransaction, ClaimsError> {
        validate_not_empty(&claim_id, "claimId")?;
        tracing::debug!(claim_id, "preparing accept");
        Ok(self.claim_handler.accept_tx(claim_id)?)
    }

    /// Prepare a `resolve` call (respondent answers the dispute)
    pub fn resolve_tx(&self, claim_id: u64, resolution_note: &str) -> Result<DeferredTransaction, ClaimsError> {
        validate_not_empty(&claim_id, "claimId")?;
        validate_not_empty(resolution_note, "resolutionNote")?;
        tracing::debug!(claim_id, "preparing resolve");
        Ok(self.claim_handler.resolve_tx(claim_id, resolution_note)?)
    }

    /// Prepare a `close` call (requester closes the dispute)
    pub fn close_tx(&self, claim_id: u64) -> Result<DeferredTransaction, ClaimsError> {
        validate_not_empty(&claim_id, "claimId")?;
        tracing::debug!(claim_id, "preparing close");
        Ok(self.claim_handler.close_tx(claim_id)?)
    }

    /// Read a claim and convert it to its human-facing form
    pub async fn get_claim(&self, claim_id: u64) -> Result<Claim, ClaimsError> {
        validate_not_empty(&claim_id, "claimId")?;
        tracing::debug!(claim_id, "fetching claim");

        let raw = self.claim_handler.claim(claim_id).await?;
        self.to_claim(claim_id, raw)
    }

    fn to_claim(&self, claim_id: u64, raw: RawClaim) -> Result<Claim, ClaimsError> {
        Ok(Claim {
            id: claim_id,
            state_id: ClaimStatus::try_from(raw.state)?,
            modified_at: format_modified_at(raw.modified)?,
            deal_id: u256_to_u64(raw.deal_id, "dealId")?,
            reason_note: raw.reason_note,
            requester_id: raw.requester_id,
            requester_address: raw.requester_address,
            requester_staked: self.converter.to_float(raw.requester_staked),
            respondent_id: raw.respondent_id,
            respondent_address: raw.respondent_address,
            resolution_note: raw.resolution_note,
            contract_address: self.claim_handler.address(),
        })
    }

    /// Prepare an `approve` call letting the claim handler spend `tokens`
    pub fn allow_tx(&self, tokens: &TokenAmount) -> Result<DeferredTransaction, ClaimsError> {
        validate_not_empty(tokens, "tokens")?;
        let amount = self.converter.to_blockchain(tokens)?;
        tracing::debug!(tokens = %tokens, "preparing approve");
        Ok(self.token.approve_tx(self.claim_handler.address(), amount)?)
    }

    /// Prepare an `approve` call resetting the claim handler's allowance to zero
    pub fn clear_allowance_tx(&self) -> Result<DeferredTransaction, ClaimsError> {
        self.allow_tx(&TokenAmount::zero())
    }

    /// Tokens `wallet_address` has approved for the claim handler
    pub async fn get_allowance(&self, wallet_address: &str) -> Result<TokenAmount, ClaimsError> {
        validate_not_empty(wallet_address, "walletAddress")?;
        let owner = parse_address(wallet_address, "walletAddress")?;

        let raw = self.token.allowance(owner, self.claim_handler.address()).await?;
        Ok(self.converter.to_float(raw))
    }

    /// Smallest stake the claim handler accepts
    pub async fn get_min_stake(&self) -> Result<TokenAmount, ClaimsError> {
        let raw = self.claim_handler.min_stake().await?;
        Ok(self.converter.to_float(raw))
    }

    /// Number of claims created so far
    pub async fn get_claims_count(&self) -> Result<u64, ClaimsError> {
        let count = self.claim_handler.claims_count().await?;
        u256_to_u64(count, "claimsCount")
    }

    /// Check the converter against the token's on-chain `decimals()`
    pub async fn verify_token_decimals(&self) -> Result<(), ClaimsError> {
        let on_chain = u32::from(self.token.decimals().await?);
        let configured = self.converter.decimals();
        if on_chain != configured {
            tracing::warn!(configured, on_chain, "token decimals mismatch");
            return Err(ClaimsError::DecimalsMismatch {
                configured,
                on_chain,
            });
        }
        Ok(())
    }
}

fn required_address(value: Option<&str>, name: &str) -> Result<Address, ClaimsError> {
    validate_not_empty(&value, name)?;
    parse_address(value.unwrap_or_default(), name)
}

fn parse_address(value: &str, name: &str) -> Result<Address, ClaimsError> {
    Address::from_hex(value).map_err(|e| ClaimsError::InvalidAddress {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

fn u256_to_u64(value: U256, name: &str) -> Result<u64, ClaimsError> {
    if value > U256::from(u64::MAX) {
        return Err(SdkError::AbiDecode(format!("{} {} does not fit in u64", name, value)).into());
    }
    Ok(value.as_u64())
}

/// UNIX seconds to ISO-8601 UTC with milliseconds
fn format_modified_at(seconds: U256) -> Result<String, ClaimsError> {
    let invalid = || SdkError::AbiDecode(format!("modified timestamp {} out of range", seconds));
    let seconds = i64::try_from(u256_to_u64(seconds, "modified")?).map_err(|_| invalid())?;
    let time = chrono::DateTime::<chrono::Utc>::from_timestamp(seconds, 0).ok_or_else(invalid)?;
    Ok(time.format(MODIFIED_AT_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_modified_at() {
        assert_eq!(
            format_modified_at(U256::from(1_700_000_000u64)).unwrap(),
            "2023-11-14T22:13:20.000Z"
        );
        assert_eq!(format_modified_at(U256::zero()).unwrap(), "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_format_modified_at_out_of_range() {
        assert!(format_modified_at(U256::MAX).is_err());
        assert!(format_modified_at(U256::from(u64::MAX)).is_err());
    }

    #[test]
    fn test_deal_hash_marker() {
        assert_eq!(DEAL_HASH_MARKER[0], 1);
        assert!(DEAL_HASH_MARKER[1..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_required_address() {
        assert!(matches!(
            required_address(None, "options.x"),
            Err(ClaimsError::EmptyValue { name }) if name == "options.x"
        ));
        assert!(matches!(
            required_address(Some(""), "options.x"),
            Err(ClaimsError::EmptyValue { .. })
        ));
        assert!(matches!(
            required_address(Some("0x12"), "options.x"),
            Err(ClaimsError::InvalidAddress { .. })
        ));
        assert!(required_address(Some("0x1111111111111111111111111111111111111111"), "options.x").is_ok());
    }
}
