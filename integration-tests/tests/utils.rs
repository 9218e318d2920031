use std::future::Future;
use std::sync::Arc;

pub use integration_tests::{
    contract_address, start_mock_node, write_project, MockNode, DEPLOYER, MERCHANT_BYTECODE,
};

pub async fn test_scaffold<F, Fut>(function_to_test: F)
where
    F: FnOnce(Arc<MockNode>, String) -> Fut,
    Fut: Future<Output = ()>,
{
    let (node, url) = start_mock_node().await;

    // Perform function tests here
    function_to_test(node, url).await;
}
