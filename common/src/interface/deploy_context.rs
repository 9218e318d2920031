use async_trait::async_trait;
use deploy_defs::{Address, DeployError, DeploymentRequest, DeploymentResult};

/// What a deploy step may ask of the environment it runs in.
///
/// Whether a submitted contract actually needs a new transaction is up to the
/// implementation; steps submit unconditionally.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeployContext: Send + Sync {
    /// Resolves a named account such as `deployer` on the current network.
    /// `None` means the name is not configured.
    async fn resolve_account(&self, name: &str) -> Result<Option<Address>, DeployError>;

    async fn submit(&self, request: DeploymentRequest) -> Result<DeploymentResult, DeployError>;
}
