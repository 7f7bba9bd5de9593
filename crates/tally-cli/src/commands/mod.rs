pub mod auth;
pub mod config;
pub mod goal;
pub mod progress;
pub mod settings;
pub mod stats;
pub mod sync;

use chrono::Duration;
use tally_core::storage::{Config, LocalStore};
use tally_core::sync::{KeyringTokens, RemoteStore};
use tally_core::ProgressGateway;

/// Build the gateway every command goes through: local store on disk,
/// remote store against the configured base URL, keyring-backed tokens.
pub fn open_gateway() -> Result<ProgressGateway, Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let local = LocalStore::open()?;
    let remote = RemoteStore::new(config.remote.base_url.clone(), Box::new(KeyringTokens));
    Ok(ProgressGateway::new(
        local,
        remote,
        Duration::seconds(i64::from(config.remote.debounce_seconds)),
    ))
}
