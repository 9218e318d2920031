mod deploy;
mod deployments;
mod steps;

pub use deploy::{handle_deploy, DeployArgs};
pub use deployments::handle_list_deployments;
pub use steps::handle_list_steps;
