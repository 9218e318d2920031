use serde::{Deserialize, Serialize};

/// Compiler output for a single contract.
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    #[serde(default)]
    pub abi: serde_json::Value,
    pub bytecode: String,
}

impl Artifact {
    pub fn bytecode_hex(&self) -> &str {
        self.bytecode.strip_prefix("0x").unwrap_or(&self.bytecode)
    }
}
