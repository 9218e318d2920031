use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Address, TransactionReceipt};

/// Parameters of an `eth_sendTransaction` call that creates a contract.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct TransactionRequest {
    pub from: Address,
    /// Creation bytecode followed by the encoded constructor arguments, `0x` prefixed.
    pub data: String,
}

/// The subset of the Ethereum JSON-RPC API needed to deploy contracts.
/// Signing happens on the node, for accounts it manages.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait EthRpc: Send + Sync {
    async fn chain_id(&self) -> Result<u64, anyhow::Error>;
    async fn accounts(&self) -> Result<Vec<Address>, anyhow::Error>;
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<String, anyhow::Error>;
    async fn get_transaction_receipt(
        &self,
        tx_hash: &str,
    ) -> Result<Option<TransactionReceipt>, anyhow::Error>;
}
