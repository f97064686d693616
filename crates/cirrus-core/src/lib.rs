pub mod config;
pub mod error;

pub use config::{
    Config, LocationConfig, LocationProvider, StorageConfig, ValidationResult, WeatherApiConfig,
};
pub use error::{
    AppError, ConfigError, LocationError, NetworkError, ReqwestErrorExt, StorageError,
    WeatherError,
};

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};

/// Initialize logging for the application
///
/// Output is appended to `log_file` so it never lands on the terminal the
/// front end draws on.
pub fn init(log_file: &Path) -> Result<()> {
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent).context("Failed to create log directory")?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    tracing::info!("Cirrus core initialized");
    Ok(())
}

/// Default log file, next to the persisted widget data
pub fn default_log_file() -> std::path::PathBuf {
    StorageConfig::default().effective_data_dir().join("cirrus.log")
}
