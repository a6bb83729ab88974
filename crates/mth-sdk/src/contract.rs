//! Contract definitions and bound contract calls

use bytes::Bytes;
use mth_primitives::Address;
use std::fmt;

use crate::abi::{decode, encode_function_call, function_selector, ParamType, Token};
use crate::client::EthClient;
use crate::types::{BlockId, CallRequest};
use crate::SdkError;

/// Function definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef {
    /// Function name
    pub name: String,
    /// Canonical signature (e.g., "transfer(address,uint256)")
    pub signature: String,
    /// Function selector (4 bytes)
    pub selector: [u8; 4],
    /// Input parameter types
    pub inputs: Vec<ParamType>,
    /// Output parameter types
    pub outputs: Vec<ParamType>,
}

impl FunctionDef {
    /// Create a function definition; the signature is derived from name and inputs
    pub fn new(name: impl Into<String>, inputs: Vec<ParamType>, outputs: Vec<ParamType>) -> Self {
        let name = name.into();
        let args: Vec<String> = inputs.iter().map(ParamType::solidity_name).collect();
        let signature = format!("{}({})", name, args.join(","));
        let selector = function_selector(&signature);
        Self {
            name,
            signature,
            selector,
            inputs,
            outputs,
        }
    }
}

/// Contract interface for encoding calls and decoding results
#[derive(Debug, Clone)]
pub struct Contract {
    address: Address,
    functions: Vec<FunctionDef>,
}

impl Contract {
    /// Create an empty contract interface
    pub fn new(address: Address) -> Self {
        Self {
            address,
            functions: Vec::new(),
        }
    }

    /// Get the contract address
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Get a function by name
    pub fn function(&self, name: &str) -> Result<&FunctionDef, SdkError> {
        self.functions
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| SdkError::AbiEncode(format!("Unknown function: {}", name)))
    }

    /// Encode a function call
    pub fn encode_call(&self, function_name: &str, args: &[Token]) -> Result<Bytes, SdkError> {
        let function = self.function(function_name)?;

        if args.len() != function.inputs.len() {
            return Err(SdkError::AbiEncode(format!(
                "{}: expected {} arguments, got {}",
                function.signature,
                function.inputs.len(),
                args.len()
            )));
        }

        if let Some((i, (arg, expected))) = args
            .iter()
            .zip(function.inputs.iter())
            .enumerate()
            .find(|(_, (arg, expected))| !arg.matches(expected))
        {
            return Err(SdkError::AbiEncode(format!(
                "{}: argument {} is {:?}, expected {}",
                function.signature,
                i,
                arg.type_of(),
                expected.solidity_name()
            )));
        }

        Ok(Bytes::from(encode_function_call(function.selector, args)))
    }

    /// Decode function output
    pub fn decode_output(&self, function_name: &str, data: &[u8]) -> Result<Vec<Token>, SdkError> {
        let function = self
            .function(function_name)
            .map_err(|_| SdkError::AbiDecode(format!("Unknown function: {}", function_name)))?;

        decode(&function.outputs, data)
    }
}

/// Builder for contract interfaces
pub struct ContractBuilder {
    address: Address,
    functions: Vec<FunctionDef>,
}

impl ContractBuilder {
    /// Create a new contract builder
    pub fn new(address: Address) -> Self {
        Self {
            address,
            functions: Vec::new(),
        }
    }

    /// Add a function
    pub fn function(mut self, name: &str, inputs: Vec<ParamType>, outputs: Vec<ParamType>) -> Self {
        self.functions.push(FunctionDef::new(name, inputs, outputs));
        self
    }

    /// Build the contract
    pub fn build(self) -> Contract {
        Contract {
            address: self.address,
            functions: self.functions,
        }
    }
}

/// ERC-20 interface subset used for staking allowances
pub fn erc20(address: Address) -> Contract {
    ContractBuilder::new(address)
        .function("decimals", vec![], vec![ParamType::Uint(8)])
        .function("balanceOf", vec![ParamType::Address], vec![ParamType::Uint(256)])
        .function(
            "approve",
            vec![ParamType::Address, ParamType::Uint(256)],
            vec![ParamType::Bool],
        )
        .function(
            "allowance",
            vec![ParamType::Address, ParamType::Address],
            vec![ParamType::Uint(256)],
        )
        .build()
}

/// A contract interface bound to a client, able to run reads and prepare writes
#[derive(Debug, Clone)]
pub struct BoundContract {
    contract: Contract,
    client: EthClient,
}

impl BoundContract {
    /// Bind a contract interface to a client
    pub fn new(contract: Contract, client: EthClient) -> Self {
        Self { contract, client }
    }

    /// Deployed contract address
    pub fn address(&self) -> Address {
        *self.contract.address()
    }

    /// Underlying interface
    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    /// Run a read-only call against the latest block and decode its outputs
    pub async fn call(&self, function_name: &str, args: &[Token]) -> Result<Vec<Token>, SdkError> {
        let data = self.contract.encode_call(function_name, args)?;
        let request = CallRequest {
            to: Some(self.address()),
            data: Some(data),
            ..Default::default()
        };

        let output = self.client.call(&request, BlockId::Latest).await?;
        self.contract.decode_output(function_name, &output)
    }

    /// Prepare an unsent state-changing call
    pub fn transaction(&self, function_name: &str, args: &[Token]) -> Result<DeferredTransaction, SdkError> {
        let data = self.contract.encode_call(function_name, args)?;
        Ok(DeferredTransaction {
            client: self.client.clone(),
            contract_address: self.address(),
            method: function_name.to_string(),
            data,
        })
    }
}

/// Unsent contract call: target address plus encoded call data.
///
/// Signing, nonce and gas-price selection and broadcasting belong to the
/// caller; this type only describes the call and can ask the node for a gas
/// estimate.
#[derive(Clone)]
pub struct DeferredTransaction {
    client: EthClient,
    contract_address: Address,
    method: String,
    data: Bytes,
}

impl fmt::Debug for DeferredTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredTransaction")
            .field("contract_address", &self.contract_address)
            .field("method", &self.method)
            .field("data", &self.encode_abi())
            .finish()
    }
}

impl DeferredTransaction {
    /// Contract the call targets
    pub fn contract_address(&self) -> Address {
        self.contract_address
    }

    /// Contract method name
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Encoded call data (selector + arguments)
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Call data as a 0x-prefixed hex string
    pub fn encode_abi(&self) -> String {
        format!("0x{}", hex::encode(&self.data))
    }

    /// Call request for this transaction, sent from `from`
    pub fn call_request(&self, from: Option<Address>) -> CallRequest {
        CallRequest {
            from,
            to: Some(self.contract_address),
            data: Some(self.data.clone()),
            ..Default::default()
        }
    }

    /// Ask the node how much gas this call would use when sent from `from`
    pub async fn estimate_gas(&self, from: Option<Address>) -> Result<u64, SdkError> {
        self.client.estimate_gas(&self.call_request(from)).await
    }
}
