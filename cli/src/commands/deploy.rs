use anyhow::Result;
use colored::Colorize;
use deploy_common::{all_steps, DeployRunner, NetworkDeployContext};
use http_client::JsonRpcClient;
use log::info;

use crate::utils::{apply_rpc_url_override, load_config, resolve_network};

pub struct DeployArgs<'a> {
    pub config_path: Option<&'a str>,
    pub network: Option<&'a str>,
    pub tags: Vec<String>,
    pub reset: bool,
}

/// Runs the selected deploy steps against a network and returns their names.
pub async fn handle_deploy(args: DeployArgs<'_>) -> Result<Vec<String>> {
    let (mut config, base_dir) = load_config(args.config_path)?;
    let network = resolve_network(args.network, &config);
    let url = apply_rpc_url_override(&mut config, &network)?;

    let context = NetworkDeployContext::new(
        config,
        &network,
        Box::new(JsonRpcClient::new(&url)),
        &base_dir,
    )?;
    if args.reset {
        context.registry().reset()?;
    }

    let runner = DeployRunner::with_steps(all_steps())?;
    info!("Deploying to network {} at {}", network, url);
    let executed = runner.run(&context, &args.tags).await?;

    println!(
        "{} {} on {}",
        "Completed".green().bold(),
        if executed.is_empty() {
            "no deploy steps".to_string()
        } else {
            executed.join(", ")
        },
        network
    );
    Ok(executed)
}
