use std::env;

use chrono::Local;
use log::LevelFilter;

/// Reads `LOG_LEVEL`, falling back to `default_level` when unset or unrecognized.
pub fn log_level_from_env(default_level: LevelFilter) -> LevelFilter {
    match env::var("LOG_LEVEL").as_deref() {
        Ok("info") => LevelFilter::Info,
        Ok("debug") => LevelFilter::Debug,
        Ok("warn") => LevelFilter::Warn,
        Ok("error") => LevelFilter::Error,
        _ => default_level,
    }
}

pub fn setup_logging(default_level: LevelFilter) -> Result<(), fern::InitError> {
    let level = log_level_from_env(default_level);

    let stderr_config = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}] {}: {}",
                Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        // Dependencies are noisy at debug level
        .level_for("hyper", LevelFilter::Warn)
        .level_for("reqwest", LevelFilter::Warn)
        .chain(std::io::stderr());

    fern::Dispatch::new().chain(stderr_config).apply()?;

    Ok(())
}
