use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const CHAIN_ID: u64 = 31337;
pub const DEPLOYER: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
pub const SECOND_ACCOUNT: &str = "0x70997970c51812dc3a010c7d01b50e0d17dc79c8";
pub const MERCHANT_BYTECODE: &str = "0x608060405234801561001057600080fd5b50";

/// In-process stand-in for a development node with unlocked accounts.
/// Receipts show up on the second poll so callers have to wait for them.
#[derive(Default)]
pub struct MockNode {
    pub sent: Mutex<Vec<Value>>,
    receipt_polls: Mutex<HashMap<String, u32>>,
    pub reject_transactions: Mutex<bool>,
}

impl MockNode {
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    fn handle(&self, method: &str, params: &Value) -> Result<Value, (i64, String)> {
        match method {
            "eth_chainId" => Ok(json!(format!("0x{:x}", CHAIN_ID))),
            "eth_accounts" => Ok(json!([DEPLOYER, SECOND_ACCOUNT])),
            "eth_sendTransaction" => {
                if *self.reject_transactions.lock().unwrap() {
                    return Err((
                        -32000,
                        "insufficient funds for gas * price + value".to_string(),
                    ));
                }
                let mut sent = self.sent.lock().unwrap();
                sent.push(params[0].clone());
                Ok(json!(tx_hash(sent.len())))
            }
            "eth_getTransactionReceipt" => {
                let hash = params[0].as_str().unwrap_or_default().to_string();
                let sent = self.sent.lock().unwrap();
                let Some(index) = (1..=sent.len()).find(|n| tx_hash(*n) == hash) else {
                    return Ok(Value::Null);
                };
                let mut polls = self.receipt_polls.lock().unwrap();
                let count = polls.entry(hash.clone()).or_insert(0);
                *count += 1;
                if *count < 2 {
                    return Ok(Value::Null);
                }
                Ok(json!({
                    "transactionHash": hash,
                    "contractAddress": contract_address(index),
                    "gasUsed": "0x3e09d",
                    "blockNumber": format!("0x{:x}", index),
                    "status": "0x1",
                    "logs": []
                }))
            }
            other => Err((-32601, format!("the method {} does not exist", other))),
        }
    }
}

pub fn tx_hash(n: usize) -> String {
    format!("0x{:064x}", n)
}

pub fn contract_address(n: usize) -> String {
    format!("0x{:040x}", 0x5fbd_usize + n)
}

async fn handle_rpc(State(node): State<Arc<MockNode>>, Json(request): Json<Value>) -> Json<Value> {
    let id = request["id"].clone();
    let method = request["method"].as_str().unwrap_or_default();
    match node.handle(method, &request["params"]) {
        Ok(result) => Json(json!({"jsonrpc": "2.0", "id": id, "result": result})),
        Err((code, message)) => Json(json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {"code": code, "message": message}
        })),
    }
}

pub async fn start_mock_node() -> (Arc<MockNode>, String) {
    let node = Arc::new(MockNode::default());
    let app = Router::new()
        .route("/", post(handle_rpc))
        .with_state(node.clone());
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock node");
    let url = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (node, url)
}

/// Writes a project with a compiled Merchant artifact and a deploy.yaml
/// pointing at `rpc_url`.
pub fn write_project(dir: &Path, rpc_url: &str, deployer_index: usize) {
    let artifacts = dir.join("artifacts/contracts/Merchant.sol");
    fs::create_dir_all(&artifacts).unwrap();
    fs::write(
        artifacts.join("Merchant.json"),
        json!({
            "contractName": "Merchant",
            "abi": [{"type": "constructor", "inputs": [], "stateMutability": "nonpayable"}],
            "bytecode": MERCHANT_BYTECODE,
        })
        .to_string(),
    )
    .unwrap();

    fs::write(
        dir.join("deploy.yaml"),
        format!(
            r#"
defaultNetwork: localhost
networks:
  localhost:
    url: {}
    receiptTimeout: 5s
    pollInterval: 20ms
namedAccounts:
  deployer:
    default: {}
"#,
            rpc_url, deployer_index
        ),
    )
    .unwrap();
}
