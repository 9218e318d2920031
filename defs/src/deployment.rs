use serde::{Deserialize, Serialize};

use crate::Address;

/// Constructor arguments a contract is deployed with.
///
/// `TwoAddress` describes an alternate configuration that is not activated by
/// any step or command; it only exists so it can be selected explicitly.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ConstructorArgsVariant {
    #[default]
    Empty,
    TwoAddress(Address, Address),
}

impl ConstructorArgsVariant {
    pub fn args(&self) -> Vec<Address> {
        match self {
            ConstructorArgsVariant::Empty => vec![],
            ConstructorArgsVariant::TwoAddress(first, second) => {
                vec![first.clone(), second.clone()]
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentRequest {
    pub contract_name: String,
    pub constructor_args: ConstructorArgsVariant,
    pub from: Address,
    pub log: bool,
}

impl DeploymentRequest {
    pub fn args(&self) -> Vec<Address> {
        self.constructor_args.args()
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    pub contract_address: Option<Address>,
    pub gas_used: u64,
    pub block_number: u64,
    pub status: u64,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        self.status == 1
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentResult {
    pub contract_name: String,
    pub address: Address,
    pub transaction_hash: Option<String>,
    pub receipt: Option<TransactionReceipt>,
    /// `false` when an existing deployment was reused and nothing was sent.
    pub newly_deployed: bool,
}

/// One entry of the deployment registry, stored per network and contract.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub address: Address,
    pub abi: serde_json::Value,
    pub transaction_hash: String,
    pub receipt: TransactionReceipt,
    pub args: Vec<Address>,
    pub bytecode_hash: String,
    pub deployed_at: String,
}

impl DeploymentRecord {
    pub fn matches(&self, bytecode_hash: &str, args: &[Address]) -> bool {
        self.bytecode_hash == bytecode_hash && self.args == args
    }
}
