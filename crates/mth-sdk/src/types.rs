//! JSON-RPC request and response types

use mth_primitives::{Address, U256};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Block identifier for RPC queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockId {
    /// Block number
    Number(u64),
    /// Latest block
    #[default]
    Latest,
    /// Pending block (includes pending transactions)
    Pending,
    /// Earliest block (genesis)
    Earliest,
}

impl Serialize for BlockId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            BlockId::Number(n) => serializer.serialize_str(&format!("0x{:x}", n)),
            BlockId::Latest => serializer.serialize_str("latest"),
            BlockId::Pending => serializer.serialize_str("pending"),
            BlockId::Earliest => serializer.serialize_str("earliest"),
        }
    }
}

/// Call request for eth_call and eth_estimateGas
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallRequest {
    /// Sender address
    pub from: Option<Address>,
    /// Recipient address
    pub to: Option<Address>,
    /// Gas limit
    pub gas: Option<u64>,
    /// Value to transfer
    pub value: Option<U256>,
    /// Input data
    pub data: Option<Bytes>,
}

impl Serialize for CallRequest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let count = [
            self.from.is_some(),
            self.to.is_some(),
            self.gas.is_some(),
            self.value.is_some(),
            self.data.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count();

        let mut map = serializer.serialize_map(Some(count))?;

        if let Some(from) = &self.from {
            map.serialize_entry("from", &from.to_hex())?;
        }
        if let Some(to) = &self.to {
            map.serialize_entry("to", &to.to_hex())?;
        }
        if let Some(gas) = &self.gas {
            map.serialize_entry("gas", &format!("0x{:x}", gas))?;
        }
        if let Some(value) = &self.value {
            map.serialize_entry("value", &format!("0x{:x}", value))?;
        }
        if let Some(data) = &self.data {
            map.serialize_entry("data", &format!("0x{}", hex::encode(data)))?;
        }

        map.end()
    }
}

/// Transaction receipt as returned by `eth_getTransactionReceipt`.
///
/// Every field is optional: nodes differ in what they return, and callers may
/// hand over receipts obtained elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionReceipt {
    /// Block hash
    pub block_hash: Option<String>,
    /// Block number (hex quantity)
    pub block_number: Option<String>,
    /// Created contract address, if any
    pub contract_address: Option<String>,
    /// Cumulative gas used in the block (hex quantity)
    pub cumulative_gas_used: Option<String>,
    /// Sender
    pub from: Option<String>,
    /// Gas used by this transaction (hex quantity)
    pub gas_used: Option<String>,
    /// Emitted logs, in order
    pub logs: Option<Vec<LogEntry>>,
    /// Logs bloom
    pub logs_bloom: Option<String>,
    /// `0x1` on success, `0x0` on revert
    pub status: Option<String>,
    /// Recipient
    pub to: Option<String>,
    /// Transaction hash
    pub transaction_hash: Option<String>,
    /// Position in the block (hex quantity)
    pub transaction_index: Option<String>,
}

/// Log entry of a transaction receipt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogEntry {
    /// Emitting contract
    pub address: Option<String>,
    /// Indexed topics as hex strings; topic 0 is the event signature
    pub topics: Option<Vec<String>>,
    /// Non-indexed data
    pub data: Option<String>,
}

impl TransactionReceipt {
    /// True when the receipt reports a successful execution
    pub fn is_success(&self) -> bool {
        matches!(self.status.as_deref(), Some("0x1") | Some("0x01") | Some("1"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_id_serialize() {
        assert_eq!(serde_json::to_string(&BlockId::Latest).unwrap(), "\"latest\"");
        assert_eq!(serde_json::to_string(&BlockId::Number(100)).unwrap(), "\"0x64\"");
        assert_eq!(serde_json::to_string(&BlockId::Pending).unwrap(), "\"pending\"");
    }

    #[test]
    fn test_call_request_serialize() {
        let req = CallRequest {
            to: Some(Address::ZERO),
            data: Some(Bytes::from(vec![0x01, 0x02])),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["to"], "0x0000000000000000000000000000000000000000");
        assert_eq!(json["data"], "0x0102");
        assert!(json.get("from").is_none());
    }

    #[test]
    fn test_call_request_serialize_value() {
        let req = CallRequest {
            value: Some(U256::from(1000)),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["value"], "0x3e8");
    }

    #[test]
    fn test_receipt_deserialize_partial() {
        let json = serde_json::json!({
            "transactionHash": "0xabc",
            "status": "0x1",
            "logs": [
                { "topics": ["0x01"] },
                { "address": "0x00", "topics": ["0x01", "0x02", "0x7b"], "data": "0x" }
            ]
        });
        let receipt: TransactionReceipt = serde_json::from_value(json).unwrap();

        assert!(receipt.is_success());
        assert_eq!(receipt.transaction_hash.as_deref(), Some("0xabc"));
        let logs = receipt.logs.unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[1].topics.as_ref().unwrap()[2], "0x7b");
        assert!(logs[0].data.is_none());
    }
}
