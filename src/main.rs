use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use javac_locator::settings::default_settings_path;
use javac_locator::{
    init_logging, set_log_level, JavaEnvironment, JavacLocator, SettingsManager, DEFAULT_LOG_LEVEL,
};

fn main() -> ExitCode {
    match run() {
        Ok(javac) => {
            println!("{}", javac.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<PathBuf> {
    init_logging(DEFAULT_LOG_LEVEL);

    let settings_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(default_settings_path);

    let manager = SettingsManager::new(settings_path.clone())
        .with_context(|| format!("Failed to load settings from {}", settings_path.display()))?;
    set_log_level(&manager.get().advanced.log_level);

    let env = JavaEnvironment::capture(&manager.get().java)?;
    log::info!("Searching for javac from Java home {}", env.java_home.display());

    let javac = JavacLocator::new().require_javac_executable(&env)?;
    Ok(javac)
}
