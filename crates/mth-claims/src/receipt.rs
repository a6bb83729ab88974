//! Claim id recovery from a creation receipt

use mth_primitives::{parse_u256_hex, U256};
use mth_sdk::types::TransactionReceipt;

use crate::ClaimsError;

/// Position of the claim-handler event among the create transaction's logs.
/// Log 0 is the token transfer of the staked amount.
const CREATE_EVENT_LOG: usize = 1;

/// Indexed topic holding the claim id (`ClaimCreated(dealId, claimIdx)`)
const CLAIM_ID_TOPIC: usize = 2;

/// Extract the id of a newly created claim from its creation receipt.
///
/// Reads `logs[1].topics[2]` as a hex integer. The receipt is not checked to
/// actually come from a `create` call; any receipt without that shape is
/// rejected.
pub fn extract_claim_id(receipt: &TransactionReceipt) -> Result<u64, ClaimsError> {
    let topic = receipt
        .logs
        .as_ref()
        .and_then(|logs| logs.get(CREATE_EVENT_LOG))
        .and_then(|log| log.topics.as_ref())
        .and_then(|topics| topics.get(CLAIM_ID_TOPIC))
        .filter(|topic| !topic.is_empty())
        .ok_or_else(|| {
            ClaimsError::InvalidReceipt(format!(
                "missing logs[{}].topics[{}]",
                CREATE_EVENT_LOG, CLAIM_ID_TOPIC
            ))
        })?;

    let id = parse_u256_hex(topic).map_err(|e| ClaimsError::InvalidReceipt(e.to_string()))?;
    if id > U256::from(u64::MAX) {
        return Err(ClaimsError::InvalidReceipt(format!("claim id {} out of range", id)));
    }
    Ok(id.as_u64())
}
