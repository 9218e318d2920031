mod abi;
mod artifacts;
mod network_context;
mod registry;
mod runner;

pub use abi::{creation_data, encode_constructor_args};
pub use artifacts::ArtifactStore;
pub use network_context::NetworkDeployContext;
pub use registry::FileDeploymentRegistry;
pub use runner::DeployRunner;
