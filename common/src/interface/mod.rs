mod deploy_context;
mod deploy_step;

pub use deploy_context::DeployContext;
pub use deploy_step::DeployStep;

#[cfg(test)]
pub use deploy_context::MockDeployContext;
