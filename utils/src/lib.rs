pub mod config_path;
mod file;
mod hash;
mod hex;
mod logging;
mod time;

pub use file::{find_file, read_json, write_json};
pub use hash::sha256_hex;
pub use hex::{pad_word, parse_quantity, strip_0x};
pub use logging::{log_level_from_env, setup_logging};
pub use time::get_timestamp;
