//! icogen Gateway
//!
//! Binds the crowdsale and token factory contracts to an Ethereum JSON-RPC
//! node.
//!
//! # Example
//! ```rust,ignore
//! use icogen_gateway::{Artifacts, ContractGateway, GasLimits, RpcClient, RpcGateway};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = RpcClient::new("http://localhost:8545", Duration::from_secs(30)).unwrap();
//!     let artifacts = Artifacts::load_dir("build/contracts".as_ref()).unwrap();
//!     let gateway = RpcGateway::new(client, artifacts, GasLimits::default(), Duration::from_secs(120));
//!     let crowdsale = gateway.crowdsale_at("0x...").await.unwrap();
//! }
//! ```

pub mod artifact;
pub mod contract;
pub mod decode;
pub mod error;
pub mod gateway;
pub mod rpc_client;
pub mod snapshot;

pub use artifact::{Artifact, Artifacts};
pub use contract::{ContractKind, CrowdsaleHandle, Deployment, MethodCall, TokenHandle};
pub use error::{GatewayError, Result};
pub use gateway::{parse_address, ContractGateway, GasLimits, RpcGateway};
pub use rpc_client::RpcClient;
pub use snapshot::fetch_snapshot;

/// Re-exported for gateway implementors.
pub use ethers_core::abi::Token;
