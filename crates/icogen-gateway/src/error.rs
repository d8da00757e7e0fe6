//! Error types for the contract gateway.

use icogen_types::{Address, TypesError, H256};
use thiserror::Error;

/// Gateway result type.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Gateway errors.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Transport failure talking to the node
    #[error("Connection error: {0}")]
    Connection(String),

    /// Error object returned by the node
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Node answered with a null result where one was required
    #[error("Empty result for {0}")]
    EmptyResult(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Contract artifact could not be read or is unusable
    #[error("Artifact error: {0}")]
    Artifact(String),

    #[error("ABI error: {0}")]
    Abi(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// No contract code at the address
    #[error("No contract deployed at {0:?}")]
    NotDeployed(Address),

    /// The node exposes no unlocked account to send from
    #[error("The node returned no accounts")]
    NoAccounts,

    #[error("Transaction {0:?} was reverted")]
    Reverted(H256),

    #[error("Receipt for {0:?} has no contract address")]
    MissingContractAddress(H256),

    #[error("Timed out waiting for receipt of {0:?}")]
    Timeout(H256),

    #[error("Unexpected output from {method}: expected {expected}")]
    UnexpectedOutput {
        method: String,
        expected: &'static str,
    },

    #[error(transparent)]
    Types(#[from] TypesError),
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        GatewayError::Connection(e.to_string())
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        GatewayError::Serialization(e.to_string())
    }
}

impl From<ethers_core::abi::Error> for GatewayError {
    fn from(e: ethers_core::abi::Error) -> Self {
        GatewayError::Abi(e.to_string())
    }
}
