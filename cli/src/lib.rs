pub mod commands;
mod utils;

pub use utils::{apply_rpc_url_override, load_config, resolve_network};
