use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Deployment of \"{0}\" failed: {1}")]
    Submission(String, String),

    #[error("No compiled artifact found for contract \"{0}\" under {1}. Please compile the contracts before deploying.")]
    ArtifactMissing(String, String),

    #[error("Network {network} was previously deployed to chain id {recorded}, but the node reports chain id {actual}. Use --reset to discard the old deployments.")]
    ChainIdMismatch {
        network: String,
        recorded: u64,
        actual: u64,
    },

    #[error("Other error occurred: {0}")]
    Other(#[from] anyhow::Error),
}

impl DeployError {
    pub fn submission(contract_name: &str, cause: impl std::fmt::Display) -> Self {
        DeployError::Submission(contract_name.to_string(), cause.to_string())
    }
}
