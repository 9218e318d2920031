use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use deploy_defs::{Address, EthRpc, TransactionReceipt, TransactionRequest};
use deploy_utils::parse_quantity;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

/// Receipt as returned by the node, with hex quantities.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
    transaction_hash: String,
    contract_address: Option<String>,
    gas_used: String,
    block_number: String,
    /// Absent on pre-Byzantium chains, where only successful transactions have receipts.
    status: Option<String>,
}

impl RpcReceipt {
    fn into_receipt(self) -> Result<TransactionReceipt> {
        let contract_address = match self.contract_address {
            Some(address) => Some(Address::parse(&address)?),
            None => None,
        };
        let status = match self.status {
            Some(status) => parse_quantity(&status)?,
            None => 1,
        };
        Ok(TransactionReceipt {
            transaction_hash: self.transaction_hash,
            contract_address,
            gas_used: parse_quantity(&self.gas_used)?,
            block_number: parse_quantity(&self.block_number)?,
            status,
        })
    }
}

fn parse_response<T: DeserializeOwned>(method: &str, body: &str) -> Result<T> {
    let response: RpcResponse = serde_json::from_str(body)
        .with_context(|| format!("{} returned an invalid JSON-RPC response: {}", method, body))?;
    if let Some(error) = response.error {
        return Err(anyhow!(
            "{} failed: {} (code {})",
            method,
            error.message,
            error.code
        ));
    }
    serde_json::from_value(response.result.unwrap_or(Value::Null))
        .with_context(|| format!("Unexpected result for {}", method))
}

/// Ethereum JSON-RPC over HTTP.
pub struct JsonRpcClient {
    url: String,
    client: Client,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub fn new(url: &str) -> Self {
        JsonRpcClient {
            url: url.to_string(),
            client: Client::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        debug!("Calling {} on {}", method, self.url);

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.url))?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(anyhow!(
                "{} returned HTTP {}: {}",
                self.url,
                status,
                body
            ));
        }
        parse_response(method, &body)
    }
}

#[async_trait]
impl EthRpc for JsonRpcClient {
    async fn chain_id(&self) -> Result<u64> {
        let chain_id: String = self.call("eth_chainId", json!([])).await?;
        parse_quantity(&chain_id)
    }

    async fn accounts(&self) -> Result<Vec<Address>> {
        let accounts: Vec<String> = self.call("eth_accounts", json!([])).await?;
        accounts
            .iter()
            .map(|account| Address::parse(account).map_err(anyhow::Error::from))
            .collect()
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<String> {
        self.call("eth_sendTransaction", json!([tx])).await
    }

    async fn get_transaction_receipt(&self, tx_hash: &str) -> Result<Option<TransactionReceipt>> {
        let receipt: Option<RpcReceipt> = self
            .call("eth_getTransactionReceipt", json!([tx_hash]))
            .await?;
        receipt.map(RpcReceipt::into_receipt).transpose()
    }
}
