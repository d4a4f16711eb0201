mod config;

pub use config::{Config, DisplayConfig, DurationsConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the configuration directory.
///
/// `TOMATO_CONFIG_DIR` overrides everything. Otherwise this is
/// `~/.config/tomato`, or `~/.config/tomato-dev` when `TOMATO_ENV=dev`.
/// The directory is not created here.
///
/// # Errors
/// Returns an error if no home directory can be determined.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = std::env::var_os("TOMATO_CONFIG_DIR") {
        return Ok(PathBuf::from(dir));
    }

    let base_dir = dirs::home_dir()
        .ok_or(ConfigError::NoConfigDir)?
        .join(".config");

    let env = std::env::var("TOMATO_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("tomato-dev")
    } else {
        base_dir.join("tomato")
    };
    Ok(dir)
}
