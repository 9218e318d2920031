use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use deploy_defs::{
    Address, DeployConfig, DeployError, DeploymentRecord, DeploymentRequest, DeploymentResult,
    EthRpc, NamedAccountSpec, TransactionReceipt, TransactionRequest,
};
use deploy_utils::{get_timestamp, sha256_hex};
use humantime::{format_duration, parse_duration};
use log::{debug, info};
use tokio::time::Instant;

use super::abi::creation_data;
use super::{ArtifactStore, FileDeploymentRegistry};
use crate::interface::DeployContext;

/// A [`DeployContext`] for one configured network.
///
/// Accounts are resolved through the named accounts of the config, deployments
/// go out through `eth_sendTransaction` and are recorded in a
/// [`FileDeploymentRegistry`]. A contract is reused instead of redeployed when
/// its recorded bytecode and arguments are unchanged.
pub struct NetworkDeployContext {
    network: String,
    config: DeployConfig,
    rpc: Box<dyn EthRpc>,
    artifacts: ArtifactStore,
    registry: FileDeploymentRegistry,
    receipt_timeout: Duration,
    poll_interval: Duration,
}

impl NetworkDeployContext {
    /// Paths in `config` are relative to `base_dir`.
    pub fn new(
        config: DeployConfig,
        network: &str,
        rpc: Box<dyn EthRpc>,
        base_dir: &Path,
    ) -> Result<Self, DeployError> {
        let network_config = config.network(network)?;
        let receipt_timeout = parse_setting("receiptTimeout", &network_config.receipt_timeout)?;
        let poll_interval = parse_setting("pollInterval", &network_config.poll_interval)?;

        let artifacts = ArtifactStore::new(base_dir.join(&config.paths.artifacts));
        let registry = FileDeploymentRegistry::new(base_dir.join(&config.paths.deployments), network);

        Ok(NetworkDeployContext {
            network: network.to_string(),
            config,
            rpc,
            artifacts,
            registry,
            receipt_timeout,
            poll_interval,
        })
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn registry(&self) -> &FileDeploymentRegistry {
        &self.registry
    }

    async fn wait_for_receipt(
        &self,
        contract_name: &str,
        tx_hash: &str,
    ) -> Result<TransactionReceipt, DeployError> {
        let deadline = Instant::now() + self.receipt_timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let poll = tokio::time::timeout(remaining, self.rpc.get_transaction_receipt(tx_hash));
            let receipt = match poll.await {
                Ok(receipt) => receipt
                    .map_err(|e| DeployError::submission(contract_name, format!("{:#}", e)))?,
                Err(_) => None,
            };
            if let Some(receipt) = receipt {
                return Ok(receipt);
            }
            let now = Instant::now();
            if now >= deadline {
                return Err(DeployError::submission(
                    contract_name,
                    format!(
                        "no receipt for transaction {} after {}",
                        tx_hash,
                        format_duration(self.receipt_timeout)
                    ),
                ));
            }
            debug!("Waiting for receipt of {}", tx_hash);
            // Never sleep past the deadline
            tokio::time::sleep(self.poll_interval.min(deadline - now)).await;
        }
    }
}

fn parse_setting(name: &str, value: &str) -> Result<Duration, DeployError> {
    parse_duration(value).map_err(|e| {
        DeployError::Configuration(format!("Invalid {} \"{}\": {}", name, value, e))
    })
}

#[async_trait]
impl DeployContext for NetworkDeployContext {
    async fn resolve_account(&self, name: &str) -> Result<Option<Address>, DeployError> {
        match self.config.named_account(name, &self.network) {
            None => Ok(None),
            Some(NamedAccountSpec::Address(address)) => Ok(Some(address.clone())),
            Some(NamedAccountSpec::Index(index)) => {
                let accounts = self.rpc.accounts().await.map_err(|e| {
                    DeployError::Other(e.context(format!(
                        "Could not list accounts of network {}",
                        self.network
                    )))
                })?;
                Ok(accounts.get(*index).cloned())
            }
        }
    }

    async fn submit(&self, request: DeploymentRequest) -> Result<DeploymentResult, DeployError> {
        let name = request.contract_name.as_str();

        let chain_id = self
            .rpc
            .chain_id()
            .await
            .map_err(|e| DeployError::submission(name, format!("{:#}", e)))?;
        self.registry.ensure_chain_id(chain_id)?;

        let artifact = self.artifacts.load(name)?;
        let args = request.args();
        let bytecode_hash = sha256_hex(artifact.bytecode_hex().as_bytes());

        if let Some(existing) = self.registry.get(name)? {
            if existing.matches(&bytecode_hash, &args) {
                if request.log {
                    info!("reusing \"{}\" at {}", name, existing.address);
                }
                return Ok(DeploymentResult {
                    contract_name: name.to_string(),
                    address: existing.address,
                    transaction_hash: None,
                    receipt: None,
                    newly_deployed: false,
                });
            }
            debug!("{} changed since its last deployment, redeploying", name);
        }

        let tx = TransactionRequest {
            from: request.from.clone(),
            data: creation_data(&artifact, &args),
        };
        let tx_hash = self
            .rpc
            .send_transaction(&tx)
            .await
            .map_err(|e| DeployError::submission(name, format!("{:#}", e)))?;
        if request.log {
            info!("deploying \"{}\" (tx: {})...", name, tx_hash);
        }

        let receipt = self.wait_for_receipt(name, &tx_hash).await?;
        if !receipt.succeeded() {
            return Err(DeployError::submission(
                name,
                format!("transaction {} reverted", tx_hash),
            ));
        }
        let address = receipt.contract_address.clone().ok_or_else(|| {
            DeployError::submission(
                name,
                format!("receipt of {} has no contract address", tx_hash),
            )
        })?;

        self.registry.save(
            name,
            &DeploymentRecord {
                address: address.clone(),
                abi: artifact.abi.clone(),
                transaction_hash: tx_hash.clone(),
                receipt: receipt.clone(),
                args,
                bytecode_hash,
                deployed_at: get_timestamp(),
            },
        )?;

        if request.log {
            info!(
                "deployed \"{}\" at {} with {} gas",
                name, address, receipt.gas_used
            );
        }

        Ok(DeploymentResult {
            contract_name: name.to_string(),
            address,
            transaction_hash: Some(tx_hash),
            receipt: Some(receipt),
            newly_deployed: true,
        })
    }
}
