use std::path::{Path, PathBuf};

use deploy_defs::{Artifact, DeployError};
use deploy_utils::{find_file, read_json};
use log::debug;

/// Compiled contract artifacts, looked up by contract name anywhere below `root`.
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ArtifactStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn load(&self, contract_name: &str) -> Result<Artifact, DeployError> {
        let path = find_file(&self.root, &format!("{}.json", contract_name)).ok_or_else(|| {
            DeployError::ArtifactMissing(contract_name.to_string(), self.root.display().to_string())
        })?;
        debug!("Loading artifact for {} from {}", contract_name, path.display());

        let artifact: Artifact = read_json(&path)?;
        if artifact.bytecode_hex().is_empty() {
            return Err(DeployError::Configuration(format!(
                "Artifact {} has no bytecode, \"{}\" may be an interface or abstract contract",
                path.display(),
                contract_name
            )));
        }
        Ok(artifact)
    }
}
