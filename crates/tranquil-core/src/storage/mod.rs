mod config;
mod store;

pub use config::{BreathingConfig, Config, CountdownConfig, LoggingConfig, RemindersConfig};
pub use store::{keys, Store};

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns `~/.config/tranquil[-dev]/` based on TRANQUIL_ENV.
///
/// Set TRANQUIL_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .ok_or(ConfigError::NoDataDir)?
        .join(".config");

    let env = std::env::var("TRANQUIL_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("tranquil-dev")
    } else {
        base_dir.join("tranquil")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
