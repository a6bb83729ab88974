//! EthClient - JSON-RPC client

use bytes::Bytes;
use mth_primitives::H256;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::transport::{deserialize_response, MockTransport, Transport};
use crate::types::{BlockId, CallRequest, TransactionReceipt};
use crate::SdkError;

#[cfg(feature = "http")]
use crate::transport::HttpTransport;

/// Ethereum JSON-RPC client.
///
/// Cloning is cheap: clones share the same transport, so one client can back
/// any number of contract bindings and in-flight requests.
#[derive(Clone)]
pub struct EthClient {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for EthClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EthClient").finish_non_exhaustive()
    }
}

impl EthClient {
    /// Create a new client with HTTP transport
    #[cfg(feature = "http")]
    pub fn http(url: &str) -> Self {
        Self::with_transport(HttpTransport::new(url))
    }

    /// Create a new client with mock transport (for testing)
    pub fn new_mock() -> Self {
        Self::with_transport(MockTransport::new())
    }

    /// Create a client with a custom transport
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Create a client over an already shared transport
    pub fn from_shared(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, SdkError> {
        let value = self.transport.request_json(method, params).await?;
        deserialize_response(value)
    }

    // ==================== Chain Info ====================

    /// Get the chain ID
    pub async fn chain_id(&self) -> Result<u64, SdkError> {
        let result: String = self.request("eth_chainId", vec![]).await?;
        parse_hex_u64(&result)
    }

    /// Get the current gas price
    pub async fn gas_price(&self) -> Result<u128, SdkError> {
        let result: String = self.request("eth_gasPrice", vec![]).await?;
        parse_hex_u128(&result)
    }

    /// Get the current block number
    pub async fn block_number(&self) -> Result<u64, SdkError> {
        let result: String = self.request("eth_blockNumber", vec![]).await?;
        parse_hex_u64(&result)
    }

    // ==================== Receipts ====================

    /// Get a transaction receipt; `None` while the transaction is unmined or unknown
    pub async fn get_receipt(&self, hash: &H256) -> Result<Option<TransactionReceipt>, SdkError> {
        self.request(
            "eth_getTransactionReceipt",
            vec![Value::String(hash.to_hex())],
        )
        .await
    }

    // ==================== Call & Estimation ====================

    /// Execute a call (read-only, does not create transaction)
    pub async fn call(&self, request: &CallRequest, block: BlockId) -> Result<Bytes, SdkError> {
        let result: String = self
            .request(
                "eth_call",
                vec![serde_json::to_value(request)?, serde_json::to_value(block)?],
            )
            .await?;
        parse_hex_bytes(&result)
    }

    /// Estimate gas for a transaction
    pub async fn estimate_gas(&self, request: &CallRequest) -> Result<u64, SdkError> {
        let result: String = self
            .request("eth_estimateGas", vec![serde_json::to_value(request)?])
            .await?;
        parse_hex_u64(&result)
    }
}

// ==================== Helper Functions ====================

fn parse_hex_u64(s: &str) -> Result<u64, SdkError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    u64::from_str_radix(s, 16).map_err(|e| SdkError::InvalidHex(e.to_string()))
}

fn parse_hex_u128(s: &str) -> Result<u128, SdkError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    u128::from_str_radix(s, 16).map_err(|e| SdkError::InvalidHex(e.to_string()))
}

fn parse_hex_bytes(s: &str) -> Result<Bytes, SdkError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    if s.is_empty() {
        return Ok(Bytes::new());
    }
    let bytes = hex::decode(s)?;
    Ok(Bytes::from(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_mock_chain_id() {
        let client = EthClient::new_mock();
        assert_eq!(client.chain_id().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_client_mock_gas_price() {
        let client = EthClient::new_mock();
        assert_eq!(client.gas_price().await.unwrap(), 1_000_000_000); // 1 gwei
    }

    #[tokio::test]
    async fn test_client_mock_estimate_gas() {
        let client = EthClient::new_mock();
        let gas = client.estimate_gas(&CallRequest::default()).await.unwrap();
        assert_eq!(gas, 21000);
    }

    #[tokio::test]
    async fn test_client_unknown_receipt_is_none() {
        let client = EthClient::new_mock();
        let receipt = client.get_receipt(&H256::ZERO).await.unwrap();
        assert!(receipt.is_none());
    }

    #[test]
    fn test_parse_hex_u64() {
        assert_eq!(parse_hex_u64("0x1").unwrap(), 1);
        assert_eq!(parse_hex_u64("0x100").unwrap(), 256);
        assert_eq!(parse_hex_u64("100").unwrap(), 256);
        assert!(parse_hex_u64("0xzz").is_err());
    }

    #[test]
    fn test_parse_hex_u128() {
        assert_eq!(parse_hex_u128("0x3b9aca00").unwrap(), 1_000_000_000);
    }

    #[test]
    fn test_parse_hex_bytes() {
        assert_eq!(parse_hex_bytes("0x1234").unwrap().as_ref(), &[0x12, 0x34]);
        assert!(parse_hex_bytes("0x").unwrap().is_empty());
    }
}
