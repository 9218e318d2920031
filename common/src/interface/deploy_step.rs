use async_trait::async_trait;
use deploy_defs::DeployError;

use super::DeployContext;

#[async_trait]
pub trait DeployStep: Send + Sync {
    fn name(&self) -> &str;

    /// Labels used to select this step from the command line.
    fn tags(&self) -> &[&'static str];

    /// Tags of steps that must run before this one.
    fn dependencies(&self) -> &[&'static str] {
        &[]
    }

    async fn run(&self, context: &dyn DeployContext) -> Result<(), DeployError>;
}
