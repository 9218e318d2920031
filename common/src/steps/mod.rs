mod merchant;

pub use merchant::{MerchantDeployStep, DEPLOYER_ACCOUNT, MERCHANT_CONTRACT, MERCHANT_TAG};

use crate::interface::DeployStep;

/// Every step this workspace knows about, in execution order.
pub fn all_steps() -> Vec<Box<dyn DeployStep>> {
    vec![Box::new(MerchantDeployStep::new())]
}
