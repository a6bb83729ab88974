//! Claim-handler contract binding

use async_trait::async_trait;
use mth_primitives::{Address, U256};
use mth_sdk::abi::{ParamType, Token};
use mth_sdk::contract::{Contract, ContractBuilder};
use mth_sdk::{BoundContract, DeferredTransaction, EthClient, SdkError};

use super::{string_to_bytes32, ClaimHandlerContract, RawClaim};

/// Claim-handler ABI subset used by the SDK
pub fn claim_handler_abi(address: Address) -> Contract {
    ContractBuilder::new(address)
        .function(
            "create",
            vec![
                ParamType::Uint(256),
                ParamType::FixedBytes(32),
                ParamType::String,
                ParamType::FixedBytes(32),
                ParamType::FixedBytes(32),
                ParamType::Uint(256),
            ],
            vec![],
        )
        .function("accept", vec![ParamType::Uint(256)], vec![])
        .function("resolve", vec![ParamType::Uint(256), ParamType::String], vec![])
        .function("close", vec![ParamType::Uint(256)], vec![])
        .function(
            "claims",
            vec![ParamType::Uint(256)],
            vec![
                ParamType::Uint(8),
                ParamType::Uint(256),
                ParamType::Uint(256),
                ParamType::FixedBytes(32),
                ParamType::String,
                ParamType::FixedBytes(32),
                ParamType::Address,
                ParamType::Uint(256),
                ParamType::FixedBytes(32),
                ParamType::Address,
                ParamType::Uint(256),
                ParamType::String,
            ],
        )
        .function("minStake", vec![], vec![ParamType::Uint(256)])
        .function("getClaimsCount", vec![], vec![ParamType::Uint(256)])
        .build()
}

/// [`ClaimHandlerContract`] over JSON-RPC
#[derive(Debug, Clone)]
pub struct MonethaClaimHandler {
    inner: BoundContract,
}

impl MonethaClaimHandler {
    /// Bind the claim handler deployed at `address`
    pub fn new(address: Address, client: EthClient) -> Self {
        Self {
            inner: BoundContract::new(claim_handler_abi(address), client),
        }
    }

    async fn read_uint(&self, method: &str) -> Result<U256, SdkError> {
        self.inner
            .call(method, &[])
            .await?
            .into_iter()
            .next()
            .and_then(Token::into_uint)
            .ok_or_else(|| SdkError::AbiDecode(format!("{}(): expected uint256 output", method)))
    }
}

fn uint_arg(value: u64) -> Token {
    Token::Uint(U256::from(value))
}

#[async_trait]
impl ClaimHandlerContract for MonethaClaimHandler {
    fn address(&self) -> Address {
        self.inner.address()
    }

    fn create_tx(
        &self,
        deal_id: u64,
        deal_hash: [u8; 32],
        reason_note: &str,
        requester_id: &str,
        respondent_id: &str,
        amount_to_stake: U256,
    ) -> Result<DeferredTransaction, SdkError> {
        self.inner.transaction(
            "create",
            &[
                uint_arg(deal_id),
                Token::FixedBytes(deal_hash.to_vec()),
                Token::String(reason_note.to_string()),
                Token::FixedBytes(string_to_bytes32(requester_id)?.to_vec()),
                Token::FixedBytes(string_to_bytes32(respondent_id)?.to_vec()),
                Token::Uint(amount_to_stake),
            ],
        )
    }

    fn accept_tx(&self, claim_id: u64) -> Result<DeferredTransaction, SdkError> {
        self.inner.transaction("accept", &[uint_arg(claim_id)])
    }

    fn resolve_tx(&self, claim_id: u64, resolution_note: &str) -> Result<DeferredTransaction, SdkError> {
        self.inner.transaction(
            "resolve",
            &[uint_arg(claim_id), Token::String(resolution_note.to_string())],
        )
    }

    fn close_tx(&self, claim_id: u64) -> Result<DeferredTransaction, SdkError> {
        self.inner.transaction("close", &[uint_arg(claim_id)])
    }

    async fn claim(&self, claim_id: u64) -> Result<RawClaim, SdkError> {
        let tokens = self.inner.call("claims", &[uint_arg(claim_id)]).await?;
        RawClaim::from_tokens(tokens)
    }

    async fn min_stake(&self) -> Result<U256, SdkError> {
        self.read_uint("minStake").await
    }

    async fn claims_count(&self) -> Result<U256, SdkError> {
        self.read_uint("getClaimsCount").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mth_sdk::abi::encode;
    use mth_sdk::MockTransport;
    use serde_json::json;

    fn handler_address() -> Address {
        Address::from_bytes([0x11; 20])
    }

    #[test]
    fn test_create_encodes_ids_as_bytes32() {
        let handler = MonethaClaimHandler::new(handler_address(), EthClient::new_mock());
        let mut marker = [0u8; 32];
        marker[0] = 1;

        let tx = handler
            .create_tx(123, marker, "broken", "user-1", "user-2", U256::from(15_000_000))
            .unwrap();

        assert_eq!(tx.contract_address(), handler_address());
        assert_eq!(tx.method(), "create");
        let data = tx.data();
        // deal id
        assert_eq!(data[4 + 31], 123);
        // deal hash marker
        assert_eq!(data[4 + 32], 1);
        // requester id sits in the fourth head word
        assert_eq!(&data[4 + 96..4 + 102], b"user-1");
        assert_eq!(&data[4 + 128..4 + 134], b"user-2");
    }

    #[test]
    fn test_create_rejects_oversized_id() {
        let handler = MonethaClaimHandler::new(handler_address(), EthClient::new_mock());
        let long_id = "x".repeat(33);
        let result = handler.create_tx(1, [0u8; 32], "r", &long_id, "b", U256::one());
        assert!(matches!(result, Err(SdkError::AbiEncode(_))));
    }

    #[test]
    fn test_transaction_selectors_differ() {
        let handler = MonethaClaimHandler::new(handler_address(), EthClient::new_mock());
        let accept = handler.accept_tx(0).unwrap();
        let close = handler.close_tx(0).unwrap();
        let resolve = handler.resolve_tx(0, "done").unwrap();

        assert_ne!(accept.data()[..4], close.data()[..4]);
        assert_eq!(accept.data().len(), 36);
        assert!(resolve.data().len() > 36);
    }

    #[tokio::test]
    async fn test_min_stake_reads_uint() {
        let transport = MockTransport::new();
        let output = encode(&[Token::Uint(U256::from(15_000_000))]);
        transport.set_response("eth_call", json!(format!("0x{}", hex::encode(output))));
        let handler = MonethaClaimHandler::new(handler_address(), EthClient::with_transport(transport));

        assert_eq!(handler.min_stake().await.unwrap(), U256::from(15_000_000));
    }

    #[tokio::test]
    async fn test_empty_call_output_is_decode_error() {
        let handler = MonethaClaimHandler::new(handler_address(), EthClient::new_mock());
        assert!(matches!(handler.claims_count().await, Err(SdkError::AbiDecode(_))));
    }
}
