mod config;
mod local;

pub use config::{Config, RemoteConfig};
pub use local::LocalStore;

use std::path::PathBuf;

/// Returns `~/.config/tally[-dev]/` based on TALLY_ENV.
///
/// Set TALLY_ENV=dev to use a separate development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TALLY_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("tally-dev")
    } else {
        base_dir.join("tally")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
