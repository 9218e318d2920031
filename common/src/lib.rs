pub mod interface;
pub mod logic;
pub mod steps;

pub use interface::{DeployContext, DeployStep};
pub use logic::{ArtifactStore, DeployRunner, FileDeploymentRegistry, NetworkDeployContext};
pub use steps::{all_steps, MerchantDeployStep};
