use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "deploy.yaml";

/// Resolves the deploy config location.
/// An explicit path wins, then `DEPLOY_CONFIG`, then `deploy.yaml` in the working directory.
pub fn get_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(path) = explicit {
        return PathBuf::from(path);
    }
    if let Ok(path) = std::env::var("DEPLOY_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from(DEFAULT_CONFIG_FILE)
}
