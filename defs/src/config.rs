use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Address, DeployError};

pub const DEFAULT_NETWORK: &str = "localhost";
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
pub const DEFAULT_RECEIPT_TIMEOUT: &str = "2m";
pub const DEFAULT_POLL_INTERVAL: &str = "500ms";
const DEFAULT_NAMED_ACCOUNT_KEY: &str = "default";

/// How a named account maps to an address on a network.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum NamedAccountSpec {
    /// Position in the node's `eth_accounts` list.
    Index(usize),
    Address(Address),
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    pub url: String,
    #[serde(default = "default_receipt_timeout")]
    pub receipt_timeout: String,
    #[serde(default = "default_poll_interval")]
    pub poll_interval: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct PathsConfig {
    #[serde(default = "default_artifacts_path")]
    pub artifacts: String,
    #[serde(default = "default_deployments_path")]
    pub deployments: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            artifacts: default_artifacts_path(),
            deployments: default_deployments_path(),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeployConfig {
    #[serde(default = "default_network")]
    pub default_network: String,
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkConfig>,
    #[serde(default)]
    pub named_accounts: BTreeMap<String, BTreeMap<String, NamedAccountSpec>>,
    #[serde(default)]
    pub paths: PathsConfig,
}

impl Default for DeployConfig {
    /// A local development node with the deployer on its first account.
    fn default() -> Self {
        let mut networks = BTreeMap::new();
        networks.insert(
            DEFAULT_NETWORK.to_string(),
            NetworkConfig {
                url: DEFAULT_RPC_URL.to_string(),
                receipt_timeout: default_receipt_timeout(),
                poll_interval: default_poll_interval(),
            },
        );
        let mut deployer = BTreeMap::new();
        deployer.insert(
            DEFAULT_NAMED_ACCOUNT_KEY.to_string(),
            NamedAccountSpec::Index(0),
        );
        let mut named_accounts = BTreeMap::new();
        named_accounts.insert("deployer".to_string(), deployer);

        DeployConfig {
            default_network: default_network(),
            networks,
            named_accounts,
            paths: PathsConfig::default(),
        }
    }
}

impl DeployConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, DeployError> {
        serde_yaml::from_str(yaml)
            .map_err(|e| DeployError::Configuration(format!("Invalid deploy config: {}", e)))
    }

    pub fn network(&self, name: &str) -> Result<&NetworkConfig, DeployError> {
        self.networks.get(name).ok_or_else(|| {
            DeployError::Configuration(format!(
                "Network \"{}\" is not configured, available networks: {}",
                name,
                self.networks.keys().cloned().collect::<Vec<_>>().join(", ")
            ))
        })
    }

    /// An entry keyed by the network name wins over the `default` entry.
    pub fn named_account(&self, name: &str, network: &str) -> Option<&NamedAccountSpec> {
        let entries = self.named_accounts.get(name)?;
        entries
            .get(network)
            .or_else(|| entries.get(DEFAULT_NAMED_ACCOUNT_KEY))
    }
}

fn default_network() -> String {
    DEFAULT_NETWORK.to_string()
}

fn default_receipt_timeout() -> String {
    DEFAULT_RECEIPT_TIMEOUT.to_string()
}

fn default_poll_interval() -> String {
    DEFAULT_POLL_INTERVAL.to_string()
}

fn default_artifacts_path() -> String {
    "artifacts".to_string()
}

fn default_deployments_path() -> String {
    "deployments".to_string()
}
