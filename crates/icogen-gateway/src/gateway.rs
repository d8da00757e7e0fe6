//! The contract gateway: deploy, lookup, call and send.

use async_trait::async_trait;
use ethers_core::abi::Token;
use ethers_core::types::Bytes;
use icogen_types::{Address, CrowdsaleParameters, H256, U256};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::artifact::{Artifact, Artifacts};
use crate::contract::{
    constructor_args, ContractKind, CrowdsaleHandle, Deployment, MethodCall, TokenHandle,
};
use crate::decode;
use crate::error::{GatewayError, Result};
use crate::rpc_client::{Receipt, RpcClient, TransactionRequest};

/// Capabilities the workflow needs from the chain. The RPC implementation
/// talks to a node; tests substitute canned responses.
#[async_trait]
pub trait ContractGateway: Send + Sync {
    /// Accounts the node signs for; the first one acts as operator.
    async fn accounts(&self) -> Result<Vec<Address>>;

    async fn balance(&self, account: Address) -> Result<U256>;

    /// Deploy a crowdsale (which creates its token) and resolve both handles.
    async fn deploy(&self, from: Address, params: &CrowdsaleParameters) -> Result<Deployment>;

    /// Resolve operator input to a crowdsale with code on chain.
    async fn crowdsale_at(&self, address: &str) -> Result<CrowdsaleHandle>;

    async fn token_at(&self, address: Address) -> Result<TokenHandle>;

    /// Read-only call; returns the decoded outputs.
    async fn call(&self, from: Address, call: &MethodCall) -> Result<Vec<Token>>;

    /// State-changing transaction carrying `value` wei. Returns once mined.
    async fn send(&self, from: Address, call: &MethodCall, value: U256) -> Result<H256>;
}

/// Fixed gas limits per operation class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasLimits {
    pub deploy: u64,
    pub send: u64,
    pub call: u64,
}

impl Default for GasLimits {
    fn default() -> Self {
        Self {
            deploy: 4_000_000,
            send: 2_000_000,
            call: 2_000_000,
        }
    }
}

/// Gateway backed by an Ethereum JSON-RPC node.
#[derive(Debug)]
pub struct RpcGateway {
    client: RpcClient,
    artifacts: Artifacts,
    gas: GasLimits,
    receipt_timeout: Duration,
}

impl RpcGateway {
    pub fn new(
        client: RpcClient,
        artifacts: Artifacts,
        gas: GasLimits,
        receipt_timeout: Duration,
    ) -> Self {
        Self {
            client,
            artifacts,
            gas,
            receipt_timeout,
        }
    }

    fn artifact(&self, kind: ContractKind) -> &Artifact {
        match kind {
            ContractKind::Crowdsale => &self.artifacts.crowdsale,
            ContractKind::Token => &self.artifacts.token,
        }
    }

    async fn ensure_deployed(&self, address: Address) -> Result<()> {
        let code = self.client.get_code(&address).await?;
        if code.is_empty() {
            return Err(GatewayError::NotDeployed(address));
        }
        Ok(())
    }

    async fn mined(&self, hash: H256) -> Result<Receipt> {
        let receipt = self.client.wait_for_receipt(&hash, self.receipt_timeout).await?;
        if !receipt.succeeded() {
            return Err(GatewayError::Reverted(hash));
        }
        Ok(receipt)
    }
}

#[async_trait]
impl ContractGateway for RpcGateway {
    async fn accounts(&self) -> Result<Vec<Address>> {
        self.client.accounts().await
    }

    async fn balance(&self, account: Address) -> Result<U256> {
        self.client.get_balance(&account).await
    }

    async fn deploy(&self, from: Address, params: &CrowdsaleParameters) -> Result<Deployment> {
        params.validate()?;
        let wallet = parse_address(&params.wallet)?;
        let data = self
            .artifacts
            .crowdsale
            .encode_deploy(&constructor_args(params, wallet))?;

        let tx = TransactionRequest {
            from: Some(from),
            gas: Some(self.gas.deploy.into()),
            data: Some(Bytes::from(data)),
            ..Default::default()
        };
        let hash = self.client.send_transaction(&tx).await?;
        info!(tx = ?hash, "crowdsale deployment submitted");

        let receipt = self.mined(hash).await?;
        let address = receipt
            .contract_address
            .ok_or(GatewayError::MissingContractAddress(hash))?;
        let crowdsale = CrowdsaleHandle::new(address);

        let output = self.call(from, &crowdsale.token()).await?;
        let token = self.token_at(decode::address(output, "token")?).await?;
        info!(crowdsale = ?address, token = ?token.address(), "crowdsale deployed");

        Ok(Deployment {
            crowdsale,
            token,
            transaction_hash: hash,
        })
    }

    async fn crowdsale_at(&self, address: &str) -> Result<CrowdsaleHandle> {
        let address = parse_address(address)?;
        self.ensure_deployed(address).await?;
        Ok(CrowdsaleHandle::new(address))
    }

    async fn token_at(&self, address: Address) -> Result<TokenHandle> {
        self.ensure_deployed(address).await?;
        Ok(TokenHandle::new(address))
    }

    async fn call(&self, from: Address, call: &MethodCall) -> Result<Vec<Token>> {
        let function = self.artifact(call.contract).function(call.method)?;
        let tx = TransactionRequest {
            from: Some(from),
            to: Some(call.address),
            gas: Some(self.gas.call.into()),
            data: Some(Bytes::from(function.encode_input(&call.args)?)),
            ..Default::default()
        };

        let output = self.client.call_contract(&tx).await?;
        debug!(method = call.method, bytes = output.len(), "contract call");
        Ok(function.decode_output(&output)?)
    }

    async fn send(&self, from: Address, call: &MethodCall, value: U256) -> Result<H256> {
        let function = self.artifact(call.contract).function(call.method)?;
        let tx = TransactionRequest {
            from: Some(from),
            to: Some(call.address),
            gas: Some(self.gas.send.into()),
            value: Some(value),
            data: Some(Bytes::from(function.encode_input(&call.args)?)),
        };

        let hash = self.client.send_transaction(&tx).await?;
        info!(method = call.method, tx = ?hash, %value, "transaction submitted");
        self.mined(hash).await?;
        Ok(hash)
    }
}

/// Parse a `0x`-prefixed 20-byte hex address.
pub fn parse_address(s: &str) -> Result<Address> {
    let s = s.trim();
    if !(s.starts_with("0x") || s.starts_with("0X")) || s.len() != 42 {
        return Err(GatewayError::InvalidAddress(s.to_string()));
    }
    Address::from_str(&s[2..]).map_err(|_| GatewayError::InvalidAddress(s.to_string()))
}
