use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use deploy_defs::{DeployError, DeploymentRecord};
use deploy_utils::{read_json, write_json};
use log::{info, warn};

const CHAIN_ID_FILE: &str = ".chainId";

/// File-backed deployment registry: one JSON record per contract under
/// `<root>/<network>/`, plus the chain id the records belong to.
pub struct FileDeploymentRegistry {
    root: PathBuf,
    network: String,
}

impl FileDeploymentRegistry {
    pub fn new(root: impl Into<PathBuf>, network: &str) -> Self {
        FileDeploymentRegistry {
            root: root.into(),
            network: network.to_string(),
        }
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn network_dir(&self) -> PathBuf {
        self.root.join(&self.network)
    }

    fn record_path(&self, contract_name: &str) -> PathBuf {
        self.network_dir().join(format!("{}.json", contract_name))
    }

    pub fn get(&self, contract_name: &str) -> Result<Option<DeploymentRecord>, DeployError> {
        let path = self.record_path(contract_name);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(read_json(&path)?))
    }

    pub fn save(&self, contract_name: &str, record: &DeploymentRecord) -> Result<(), DeployError> {
        write_json(&self.record_path(contract_name), record)?;
        Ok(())
    }

    /// All records of this network, sorted by contract name.
    pub fn list(&self) -> Result<Vec<(String, DeploymentRecord)>, DeployError> {
        let dir = self.network_dir();
        if !dir.exists() {
            return Ok(vec![]);
        }

        let mut records = vec![];
        for entry in fs::read_dir(&dir).with_context(|| format!("Failed to read {}", dir.display()))? {
            let path = entry.context("Failed to read deployment entry")?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let contract_name = match path.file_stem().and_then(|s| s.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };
            records.push((contract_name, read_json(&path)?));
        }
        records.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(records)
    }

    /// Records `actual` on first use and refuses to mix records of different chains.
    pub fn ensure_chain_id(&self, actual: u64) -> Result<(), DeployError> {
        let path = self.network_dir().join(CHAIN_ID_FILE);
        if !path.exists() {
            write_chain_id(&path, actual)?;
            return Ok(());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let recorded: u64 = content
            .trim()
            .parse()
            .with_context(|| format!("Invalid chain id in {}", path.display()))?;
        if recorded != actual {
            return Err(DeployError::ChainIdMismatch {
                network: self.network.clone(),
                recorded,
                actual,
            });
        }
        Ok(())
    }

    /// Forgets every deployment of this network.
    pub fn reset(&self) -> Result<(), DeployError> {
        let dir = self.network_dir();
        if dir.exists() {
            warn!("Removing recorded deployments in {}", dir.display());
            fs::remove_dir_all(&dir)
                .with_context(|| format!("Failed to remove {}", dir.display()))?;
        }
        Ok(())
    }
}

fn write_chain_id(path: &Path, chain_id: u64) -> Result<(), DeployError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, chain_id.to_string())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Recorded chain id {} in {}", chain_id, path.display());
    Ok(())
}
