//! Manager construction options and file-based configuration

use mth_sdk::EthClient;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::conversion::MTH_DECIMALS;
use crate::ClaimsError;

/// Inputs for [`ClaimManager::new`](crate::ClaimManager::new)
#[derive(Debug, Clone, Default)]
pub struct ClaimManagerOptions {
    /// Network handle shared by both contract bindings
    pub transport: Option<EthClient>,
    /// Claim-handler contract address (0x-hex)
    pub claims_handler_contract_address: Option<String>,
    /// MTH token contract address (0x-hex)
    pub monetha_token_contract_address: Option<String>,
    /// Token decimals; [`MTH_DECIMALS`] when unset
    pub token_decimals: Option<u32>,
}

/// SDK configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimsConfig {
    /// RPC endpoint URL
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Claim-handler contract address
    #[serde(default)]
    pub claims_handler_contract_address: Option<String>,
    /// MTH token contract address
    #[serde(default)]
    pub monetha_token_contract_address: Option<String>,
    /// Token decimals
    #[serde(default = "default_token_decimals")]
    pub token_decimals: u32,
}

fn default_rpc_url() -> String {
    "http://localhost:8545".to_string()
}

fn default_token_decimals() -> u32 {
    MTH_DECIMALS
}

impl Default for ClaimsConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            claims_handler_contract_address: None,
            monetha_token_contract_address: None,
            token_decimals: default_token_decimals(),
        }
    }
}

impl ClaimsConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ClaimsError> {
        toml::from_str(content).map_err(|e| ClaimsError::Config(e.to_string()))
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClaimsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClaimsError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Manager options over an existing client
    pub fn into_options(self, client: EthClient) -> ClaimManagerOptions {
        ClaimManagerOptions {
            transport: Some(client),
            claims_handler_contract_address: self.claims_handler_contract_address,
            monetha_token_contract_address: self.monetha_token_contract_address,
            token_decimals: Some(self.token_decimals),
        }
    }
}
