//! # Configuration State
//!
//! Read-only view of the client configuration, resolved once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--api-url`, `--data-dir`)
//! 2. Environment variables (`BAZAAR_*`)
//! 3. Config file (`config.toml`)
//! 4. Defaults

use std::path::PathBuf;

use serde::Serialize;

use bazaar_api::ClientConfig;
use bazaar_core::UserId;
use bazaar_store::DATABASE_FILE;

/// Application configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Full client configuration, as loaded.
    #[serde(skip)]
    client: ClientConfig,

    /// Remote API origin.
    pub api_url: String,

    /// Profile fetched after login when the token names no user.
    pub profile_user_id: UserId,

    /// Mirror local cart adds to the remote cart collection.
    pub mirror_remote: bool,

    /// SQLite file holding the session and cart. `None` keeps state in memory.
    pub database_path: Option<PathBuf>,
}

impl ConfigState {
    pub fn new(client: ClientConfig) -> Self {
        let database_path = client
            .storage
            .resolved_data_dir()
            .map(|dir| dir.join(DATABASE_FILE));

        ConfigState {
            api_url: client.base_url().to_string(),
            profile_user_id: client.profile_user_id(),
            mirror_remote: client.mirror_remote(),
            database_path,
            client,
        }
    }

    pub fn client(&self) -> &ClientConfig {
        &self.client
    }
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState::new(ClientConfig::default())
    }
}
