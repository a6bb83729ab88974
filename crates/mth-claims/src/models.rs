//! Claim (dispute) data model

use mth_primitives::Address;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::conversion::TokenAmount;
use crate::ClaimsError;

/// On-chain dispute lifecycle state. Values match the contract's enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ClaimStatus {
    /// No claim / uninitialized slot
    Null = 0,
    /// Opened by the requester, awaiting the respondent's acceptance
    AwaitingAcceptance = 1,
    /// Accepted by the respondent, awaiting the respondent's resolution
    AwaitingResolution = 2,
    /// Resolved by the respondent, awaiting the requester's confirmation
    AwaitingConfirmation = 3,
    /// Closed by the requester after the acceptance period expired
    ClosedAfterAcceptanceExpired = 4,
    /// Closed by the requester after the resolution period expired
    ClosedAfterResolutionExpired = 5,
    /// Closed by the requester after the confirmation period expired
    ClosedAfterConfirmationExpired = 6,
    /// Closed by the requester after the respondent's resolution
    Closed = 7,
}

impl ClaimStatus {
    /// Wire value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// True once no further action is possible
    pub fn is_closed(self) -> bool {
        matches!(
            self,
            ClaimStatus::ClosedAfterAcceptanceExpired
                | ClaimStatus::ClosedAfterResolutionExpired
                | ClaimStatus::ClosedAfterConfirmationExpired
                | ClaimStatus::Closed
        )
    }

    /// True while the dispute is waiting on one of the parties
    pub fn is_open(self) -> bool {
        matches!(
            self,
            ClaimStatus::AwaitingAcceptance
                | ClaimStatus::AwaitingResolution
                | ClaimStatus::AwaitingConfirmation
        )
    }
}

impl TryFrom<u8> for ClaimStatus {
    type Error = ClaimsError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => ClaimStatus::Null,
            1 => ClaimStatus::AwaitingAcceptance,
            2 => ClaimStatus::AwaitingResolution,
            3 => ClaimStatus::AwaitingConfirmation,
            4 => ClaimStatus::ClosedAfterAcceptanceExpired,
            5 => ClaimStatus::ClosedAfterResolutionExpired,
            6 => ClaimStatus::ClosedAfterConfirmationExpired,
            7 => ClaimStatus::Closed,
            other => return Err(ClaimsError::UnknownClaimStatus(other)),
        })
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Serialize for ClaimStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

/// One dispute as stored by the claim-handler contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    /// Dispute id
    pub id: u64,
    /// Lifecycle state
    pub state_id: ClaimStatus,
    /// Last modification, ISO-8601 UTC with milliseconds
    pub modified_at: String,
    /// Deal the dispute was opened for
    pub deal_id: u64,
    /// Requester's description of the problem
    pub reason_note: String,
    /// Requester's id
    pub requester_id: String,
    /// Requester's wallet
    pub requester_address: Address,
    /// Tokens staked by the requester
    pub requester_staked: TokenAmount,
    /// Respondent's id
    pub respondent_id: String,
    /// Respondent's wallet
    pub respondent_address: Address,
    /// Respondent's resolution note
    pub resolution_note: String,
    /// Claim-handler contract the record was read from
    pub contract_address: Address,
}

/// Arguments for opening a dispute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClaimPayload {
    /// Deal the dispute is opened for
    pub deal_id: u64,
    /// Description of the problem
    pub reason: String,
    /// Requester's id (at most 32 bytes)
    pub requester_id: String,
    /// Respondent's id (at most 32 bytes)
    pub respondent_id: String,
    /// Tokens to stake
    pub tokens: TokenAmount,
}
