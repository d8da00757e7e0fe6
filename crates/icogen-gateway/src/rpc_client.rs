//! RPC client for the crowdsale gateway.
//!
//! HTTP client for making Ethereum JSON-RPC calls to a node that holds
//! unlocked accounts and signs on our behalf.

use ethers_core::types::{Bytes, U64};
use icogen_types::{Address, H256, U256};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::error::{GatewayError, Result};

/// Interval between receipt polls while a transaction is pending.
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// RPC request.
#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: serde_json::Value,
    id: u64,
}

/// RPC response.
#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

/// RPC error.
#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// Transaction or call object (`eth_sendTransaction` / `eth_call`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Bytes>,
}

/// The receipt fields the gateway relies on.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub transaction_hash: H256,
    #[serde(default)]
    pub block_number: Option<U64>,
    #[serde(default)]
    pub contract_address: Option<Address>,
    /// Absent on pre-Byzantium nodes.
    #[serde(default)]
    pub status: Option<U64>,
}

impl Receipt {
    pub fn succeeded(&self) -> bool {
        self.status.map_or(true, |status| !status.is_zero())
    }
}

/// RPC client.
#[derive(Debug)]
pub struct RpcClient {
    url: String,
    client: reqwest::Client,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Create a new RPC client with a per-request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
            next_id: AtomicU64::new(1),
        })
    }

    /// Endpoint this client talks to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Make an RPC call that must produce a result.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T> {
        self.request(method, params)
            .await?
            .ok_or_else(|| GatewayError::EmptyResult(method.to_string()))
    }

    /// Make an RPC call whose result may be null.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<Option<T>> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
        };
        trace!(method, id = request.id, "rpc request");

        let response = self.client.post(&self.url).json(&request).send().await?;
        let rpc_response: RpcResponse<T> = response.json().await?;

        if let Some(error) = rpc_response.error {
            debug!(method, code = error.code, "rpc error: {}", error.message);
            return Err(GatewayError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        Ok(rpc_response.result)
    }

    // ============ Convenience Methods ============

    /// Accounts the node can sign for.
    pub async fn accounts(&self) -> Result<Vec<Address>> {
        self.call("eth_accounts", json!([])).await
    }

    /// Get balance.
    pub async fn get_balance(&self, address: &Address) -> Result<U256> {
        self.call("eth_getBalance", json!([address, "latest"])).await
    }

    /// Get code at address.
    pub async fn get_code(&self, address: &Address) -> Result<Bytes> {
        self.call("eth_getCode", json!([address, "latest"])).await
    }

    /// Call contract (read-only).
    pub async fn call_contract(&self, tx: &TransactionRequest) -> Result<Bytes> {
        self.call("eth_call", json!([tx, "latest"])).await
    }

    /// Send a transaction for the node to sign.
    pub async fn send_transaction(&self, tx: &TransactionRequest) -> Result<H256> {
        self.call("eth_sendTransaction", json!([tx])).await
    }

    /// Get transaction receipt.
    pub async fn get_transaction_receipt(&self, hash: &H256) -> Result<Option<Receipt>> {
        self.request("eth_getTransactionReceipt", json!([hash])).await
    }

    /// Poll until the transaction is mined or `timeout` elapses.
    pub async fn wait_for_receipt(&self, hash: &H256, timeout: Duration) -> Result<Receipt> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(receipt) = self.get_transaction_receipt(hash).await? {
                debug!(tx = ?hash, block = ?receipt.block_number, "transaction mined");
                return Ok(receipt);
            }
            if Instant::now() >= deadline {
                return Err(GatewayError::Timeout(*hash));
            }
            tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
        }
    }
}
