use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use deploy_defs::DeployConfig;
use deploy_utils::config_path::get_config_path;
use log::info;

/// Loads the deploy config, falling back to the built-in localhost setup when
/// no config file was asked for and none exists.
/// Returns the config with the directory its relative paths start from.
pub fn load_config(explicit_path: Option<&str>) -> Result<(DeployConfig, PathBuf)> {
    let path = get_config_path(explicit_path);
    let base_dir = config_base_dir(&path);

    if !path.exists() {
        if explicit_path.is_some() {
            return Err(anyhow!("Config file {} does not exist", path.display()));
        }
        info!(
            "No {} found, using the default localhost configuration",
            path.display()
        );
        return Ok((DeployConfig::default(), base_dir));
    }

    let yaml = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = DeployConfig::from_yaml(&yaml)?;
    Ok((config, base_dir))
}

fn config_base_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// `--network` wins, then `DEPLOY_NETWORK`, then the config's default network.
pub fn resolve_network(network_arg: Option<&str>, config: &DeployConfig) -> String {
    if let Some(network) = network_arg {
        return network.to_string();
    }
    std::env::var("DEPLOY_NETWORK").unwrap_or_else(|_| config.default_network.clone())
}

/// Applies `DEPLOY_RPC_URL` to the selected network and returns its URL.
pub fn apply_rpc_url_override(config: &mut DeployConfig, network: &str) -> Result<String> {
    config.network(network)?;
    let network_config = config
        .networks
        .get_mut(network)
        .ok_or_else(|| anyhow!("Network {} is not configured", network))?;
    if let Ok(url) = std::env::var("DEPLOY_RPC_URL") {
        info!("Using DEPLOY_RPC_URL for network {}", network);
        network_config.url = url;
    }
    Ok(network_config.url.clone())
}
