use anyhow::Result;
use colored::Colorize;
use deploy_common::FileDeploymentRegistry;
use prettytable::{row, Table};

use crate::utils::{load_config, resolve_network};

pub fn handle_list_deployments(config_path: Option<&str>, network: Option<&str>) -> Result<()> {
    let (config, base_dir) = load_config(config_path)?;
    let network = resolve_network(network, &config);
    let registry = FileDeploymentRegistry::new(base_dir.join(&config.paths.deployments), &network);

    let records = registry.list()?;
    if records.is_empty() {
        println!("No deployments recorded for network {}", network);
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(row![
        "Contract".purple().bold(),
        "Address".blue().bold(),
        "Transaction".green().bold(),
        "Gas used".red().bold(),
        "Deployed at".bold(),
    ]);
    for (contract_name, record) in &records {
        table.add_row(row![
            contract_name,
            record.address,
            record.transaction_hash,
            record.receipt.gas_used,
            record.deployed_at,
        ]);
    }
    table.printstd();
    Ok(())
}
