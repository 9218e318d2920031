mod address;
mod artifact;
mod config;
mod deployment;
mod errors;
mod rpc;

pub use address::Address;
pub use artifact::Artifact;
pub use config::{
    DeployConfig, NamedAccountSpec, NetworkConfig, PathsConfig, DEFAULT_NETWORK,
    DEFAULT_POLL_INTERVAL, DEFAULT_RECEIPT_TIMEOUT, DEFAULT_RPC_URL,
};
pub use deployment::{
    ConstructorArgsVariant, DeploymentRecord, DeploymentRequest, DeploymentResult,
    TransactionReceipt,
};
pub use errors::DeployError;
pub use rpc::{EthRpc, TransactionRequest};

#[cfg(any(test, feature = "mock"))]
pub use rpc::MockEthRpc;
