mod mock_node;

pub use mock_node::{
    contract_address, start_mock_node, tx_hash, write_project, MockNode, CHAIN_ID, DEPLOYER,
    MERCHANT_BYTECODE, SECOND_ACCOUNT,
};
