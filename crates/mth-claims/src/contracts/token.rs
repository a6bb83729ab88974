//! MTH token binding

use async_trait::async_trait;
use mth_primitives::{Address, U256};
use mth_sdk::abi::Token;
use mth_sdk::contract::erc20;
use mth_sdk::{BoundContract, DeferredTransaction, EthClient, SdkError};

use super::TokenContract;

/// [`TokenContract`] over JSON-RPC, using the ERC-20 interface
#[derive(Debug, Clone)]
pub struct MonethaToken {
    inner: BoundContract,
}

impl MonethaToken {
    /// Bind the token deployed at `address`
    pub fn new(address: Address, client: EthClient) -> Self {
        Self {
            inner: BoundContract::new(erc20(address), client),
        }
    }
}

#[async_trait]
impl TokenContract for MonethaToken {
    fn address(&self) -> Address {
        self.inner.address()
    }

    fn approve_tx(&self, spender: Address, value: U256) -> Result<DeferredTransaction, SdkError> {
        self.inner
            .transaction("approve", &[Token::Address(spender), Token::Uint(value)])
    }

    async fn allowance(&self, owner: Address, spender: Address) -> Result<U256, SdkError> {
        self.inner
            .call("allowance", &[Token::Address(owner), Token::Address(spender)])
            .await?
            .into_iter()
            .next()
            .and_then(Token::into_uint)
            .ok_or_else(|| SdkError::AbiDecode("allowance(): expected uint256 output".to_string()))
    }

    async fn decimals(&self) -> Result<u8, SdkError> {
        let value = self
            .inner
            .call("decimals", &[])
            .await?
            .into_iter()
            .next()
            .and_then(Token::into_uint)
            .ok_or_else(|| SdkError::AbiDecode("decimals(): expected uint8 output".to_string()))?;
        u8::try_from(value.as_u64())
            .map_err(|_| SdkError::AbiDecode(format!("decimals(): {} out of range", value)))
    }
}
