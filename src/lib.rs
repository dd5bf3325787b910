pub mod error;
pub mod java;
pub mod platform;
pub mod settings;

use std::str::FromStr;

pub use error::{Error, Result};
pub use java::{find_javac_executable, FileProbe, JavaEnvironment, JavacLocator, RealFs};
pub use platform::Platform;
pub use settings::{Settings, SettingsManager};

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Installs `env_logger` at `default_level`. `RUST_LOG`, when set, wins over
/// this and over later [`set_log_level`] calls.
pub fn init_logging(default_level: &str) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace"))
        .format_timestamp(None)
        .try_init();
    set_log_level(default_level);
}

/// Changes the level of an already installed logger, e.g. once settings are loaded.
pub fn set_log_level(level: &str) {
    if std::env::var_os("RUST_LOG").is_some() {
        return;
    }

    match log::LevelFilter::from_str(level) {
        Ok(filter) => log::set_max_level(filter),
        Err(_) => log::warn!("Ignoring unknown log level {:?}", level),
    }
}
