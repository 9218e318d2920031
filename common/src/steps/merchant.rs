use async_trait::async_trait;
use deploy_defs::{ConstructorArgsVariant, DeployError, DeploymentRequest};
use log::debug;

use crate::interface::{DeployContext, DeployStep};

pub const MERCHANT_CONTRACT: &str = "Merchant";
pub const MERCHANT_TAG: &str = "Merchant";
pub const DEPLOYER_ACCOUNT: &str = "deployer";

/// Deploys the `Merchant` contract from the `deployer` account.
pub struct MerchantDeployStep {
    constructor_args: ConstructorArgsVariant,
}

impl MerchantDeployStep {
    pub fn new() -> Self {
        MerchantDeployStep {
            constructor_args: ConstructorArgsVariant::Empty,
        }
    }

    /// Selects the constructor arguments explicitly. Nothing in this crate
    /// uses anything but `ConstructorArgsVariant::Empty`.
    pub fn with_constructor_args(constructor_args: ConstructorArgsVariant) -> Self {
        MerchantDeployStep { constructor_args }
    }
}

impl Default for MerchantDeployStep {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeployStep for MerchantDeployStep {
    fn name(&self) -> &str {
        MERCHANT_CONTRACT
    }

    fn tags(&self) -> &[&'static str] {
        &[MERCHANT_TAG]
    }

    async fn run(&self, context: &dyn DeployContext) -> Result<(), DeployError> {
        let deployer = context
            .resolve_account(DEPLOYER_ACCOUNT)
            .await?
            .ok_or_else(|| {
                DeployError::Configuration(format!(
                    "Named account \"{}\" could not be resolved on this network",
                    DEPLOYER_ACCOUNT
                ))
            })?;

        debug!("Submitting {} from {}", MERCHANT_CONTRACT, deployer);
        context
            .submit(DeploymentRequest {
                contract_name: MERCHANT_CONTRACT.to_string(),
                constructor_args: self.constructor_args.clone(),
                from: deployer,
                log: true,
            })
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::MockDeployContext;
    use deploy_defs::{Address, DeploymentResult};
    use pretty_assertions::assert_eq;

    // Disabled alternate constructor arguments, which must never be sent.
    const LEGACY_FIRST_ARG: &str = "0x0997AEB2FB2E15E532B972C145E140B278510143";
    const LEGACY_SECOND_ARG: &str = "0x55DC789DC6D58C596214F10D4A7717E9EC0A8CBB";

    fn deployer() -> Address {
        Address::parse("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266").unwrap()
    }

    fn merchant_address() -> Address {
        Address::parse("0x5fbdb2315678afecb367f032d93f642f64180aa3").unwrap()
    }

    fn reused_result() -> DeploymentResult {
        DeploymentResult {
            contract_name: MERCHANT_CONTRACT.to_string(),
            address: merchant_address(),
            transaction_hash: None,
            receipt: None,
            newly_deployed: false,
        }
    }

    #[tokio::test]
    async fn test_run_submits_once_with_empty_args() {
        let mut context = MockDeployContext::new();
        context
            .expect_resolve_account()
            .withf(|name| name == DEPLOYER_ACCOUNT)
            .times(1)
            .returning(|_| Ok(Some(deployer())));
        context
            .expect_submit()
            .withf(|request| {
                request.contract_name == "Merchant"
                    && request.args().is_empty()
                    && request.from == deployer()
                    && request.log
            })
            .times(1)
            .returning(|_| Ok(reused_result()));

        MerchantDeployStep::new().run(&context).await.unwrap();
    }

    #[tokio::test]
    async fn test_unresolved_deployer_is_configuration_error() {
        let mut context = MockDeployContext::new();
        context
            .expect_resolve_account()
            .times(1)
            .returning(|_| Ok(None));
        context.expect_submit().times(0);

        let err = MerchantDeployStep::new().run(&context).await.unwrap_err();
        match err {
            DeployError::Configuration(msg) => assert!(msg.contains("deployer")),
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_skipped_deployment_is_success() {
        let mut context = MockDeployContext::new();
        context
            .expect_resolve_account()
            .returning(|_| Ok(Some(deployer())));
        context
            .expect_submit()
            .times(1)
            .returning(|_| Ok(reused_result()));

        assert!(MerchantDeployStep::new().run(&context).await.is_ok());
    }

    #[tokio::test]
    async fn test_legacy_addresses_are_never_sent() {
        let legacy = vec![
            Address::parse(LEGACY_FIRST_ARG).unwrap(),
            Address::parse(LEGACY_SECOND_ARG).unwrap(),
        ];
        let mut context = MockDeployContext::new();
        context
            .expect_resolve_account()
            .returning(|_| Ok(Some(deployer())));
        context
            .expect_submit()
            .withf(move |request| {
                request.constructor_args == ConstructorArgsVariant::Empty
                    && request.args().iter().all(|arg| !legacy.contains(arg))
            })
            .times(1)
            .returning(|_| Ok(reused_result()));

        MerchantDeployStep::default().run(&context).await.unwrap();
    }

    #[tokio::test]
    async fn test_submission_error_propagates_untouched() {
        let mut context = MockDeployContext::new();
        context
            .expect_resolve_account()
            .returning(|_| Ok(Some(deployer())));
        context.expect_submit().times(1).returning(|_| {
            Err(DeployError::Submission(
                "Merchant".to_string(),
                "insufficient funds for gas".to_string(),
            ))
        });

        let err = MerchantDeployStep::new().run(&context).await.unwrap_err();
        match err {
            DeployError::Submission(name, cause) => {
                assert_eq!(name, "Merchant");
                assert_eq!(cause, "insufficient funds for gas");
            }
            other => panic!("expected submission error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_resolution_failure_propagates() {
        let mut context = MockDeployContext::new();
        context.expect_resolve_account().returning(|_| {
            Err(DeployError::Submission(
                "deployer".to_string(),
                "connection refused".to_string(),
            ))
        });
        context.expect_submit().times(0);

        assert!(matches!(
            MerchantDeployStep::new().run(&context).await,
            Err(DeployError::Submission(_, _))
        ));
    }

    #[test]
    fn test_step_identity() {
        let step = MerchantDeployStep::new();
        assert_eq!(step.tags(), &["Merchant"]);
        assert_eq!(step.name(), "Merchant");
        assert!(step.dependencies().is_empty());
    }
}
