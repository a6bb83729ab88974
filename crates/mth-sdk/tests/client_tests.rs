//! Client and bound-contract integration tests for mth-sdk
//!
//! Drives the public API through a MockTransport and checks both the
//! requests sent and the decoded results.

use async_trait::async_trait;
use mth_sdk::abi::Token;
use mth_sdk::contract::erc20;
use mth_sdk::types::{BlockId, CallRequest};
use mth_sdk::{Address, BoundContract, EthClient, MockTransport, SdkError, Transport, H256, U256};
use serde_json::{json, Value};

fn token_address() -> Address {
    Address::from_hex("0x00000000000000000000000000000000000000aa").unwrap()
}

fn uint_word(value: u64) -> String {
    format!("0x{:064x}", value)
}

// ==================== Client Tests ====================

#[tokio::test]
async fn test_client_with_custom_chain_id() {
    let transport = MockTransport::new();
    transport.set_response("eth_chainId", Value::String("0x5".to_string()));
    let client = EthClient::with_transport(transport);

    assert_eq!(client.chain_id().await.unwrap(), 5);
}

#[tokio::test]
async fn test_clones_share_transport() {
    let transport = MockTransport::new();
    let client = EthClient::with_transport(transport.clone());
    let clone = client.clone();

    client.block_number().await.unwrap();
    clone.block_number().await.unwrap();

    assert_eq!(transport.requests().len(), 2);
}

#[tokio::test]
async fn test_call_sends_request_and_block() {
    let transport = MockTransport::new();
    transport.set_response("eth_call", Value::String("0x1234".to_string()));
    let client = EthClient::with_transport(transport.clone());

    let request = CallRequest {
        to: Some(token_address()),
        data: Some(vec![0xabu8].into()),
        ..Default::default()
    };
    let result = client.call(&request, BlockId::Latest).await.unwrap();
    assert_eq!(result.as_ref(), &[0x12, 0x34]);

    let sent = &transport.requests()[0];
    assert_eq!(sent.method, "eth_call");
    assert_eq!(sent.params[0]["to"], "0x00000000000000000000000000000000000000aa");
    assert_eq!(sent.params[0]["data"], "0xab");
    assert_eq!(sent.params[1], "latest");
}

struct RejectingTransport;

#[async_trait]
impl Transport for RejectingTransport {
    async fn request_json(&self, _method: &str, _params: Vec<Value>) -> Result<Value, SdkError> {
        Err(SdkError::Rpc {
            code: -32000,
            message: "execution reverted".to_string(),
        })
    }
}

#[tokio::test]
async fn test_rpc_error_propagates() {
    let client = EthClient::with_transport(RejectingTransport);
    match client.estimate_gas(&CallRequest::default()).await {
        Err(SdkError::Rpc { code: -32000, message }) => assert_eq!(message, "execution reverted"),
        other => panic!("Expected RPC error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_result_is_serialization_error() {
    let transport = MockTransport::new();
    transport.set_response("eth_chainId", json!(42));
    let client = EthClient::with_transport(transport);
    assert!(matches!(client.chain_id().await, Err(SdkError::Serialization(_))));
}

#[tokio::test]
async fn test_get_receipt_parses_logs() {
    let transport = MockTransport::new();
    transport.set_response(
        "eth_getTransactionReceipt",
        json!({
            "transactionHash": "0x01",
            "status": "0x1",
            "logs": [
                { "topics": ["0xaa"] },
                { "topics": ["0xbb", "0x01", "0x7b"] }
            ]
        }),
    );
    let client = EthClient::with_transport(transport.clone());

    let receipt = client.get_receipt(&H256::ZERO).await.unwrap().unwrap();
    assert!(receipt.is_success());
    assert_eq!(receipt.logs.unwrap()[1].topics.as_ref().unwrap()[2], "0x7b");
    assert_eq!(
        transport.requests()[0].params[0],
        "0x0000000000000000000000000000000000000000000000000000000000000000"
    );
}

// ==================== Bound Contract Tests ====================

#[tokio::test]
async fn test_bound_call_decodes_output() {
    let transport = MockTransport::new();
    transport.set_response("eth_call", Value::String(uint_word(1500)));
    let token = BoundContract::new(erc20(token_address()), EthClient::with_transport(transport.clone()));

    let owner = Address::from_hex("0x00000000000000000000000000000000000000bb").unwrap();
    let spender = Address::from_hex("0x00000000000000000000000000000000000000cc").unwrap();
    let out = token
        .call("allowance", &[Token::Address(owner), Token::Address(spender)])
        .await
        .unwrap();

    assert_eq!(out, vec![Token::Uint(U256::from(1500))]);
    let data = transport.requests()[0].params[0]["data"].as_str().unwrap().to_string();
    assert!(data.starts_with("0xdd62ed3e"));
}

#[tokio::test]
async fn test_bound_call_short_output_is_decode_error() {
    let transport = MockTransport::new();
    transport.set_response("eth_call", Value::String("0x01".to_string()));
    let token = BoundContract::new(erc20(token_address()), EthClient::with_transport(transport));

    let result = token.call("decimals", &[]).await;
    assert!(matches!(result, Err(SdkError::AbiDecode(_))));
}
