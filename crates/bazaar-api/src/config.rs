//! # Client Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BAZAAR_API_URL=https://fakestoreapi.com                            │
//! │     BAZAAR_TIMEOUT_SECS=10                                             │
//! │     BAZAAR_PROFILE_USER_ID=1                                           │
//! │     BAZAAR_DATA_DIR=/var/lib/bazaar                                    │
//! │     BAZAAR_MIRROR_REMOTE=true                                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/config.toml (Linux)                           │
//! │     ~/Library/Application Support/com.bazaar.storefront/ (macOS)       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     fakestoreapi.com, no timeout, profile user 1                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "https://fakestoreapi.com"
//! timeout_secs = 10          # omit for no timeout
//! mirror_remote = false      # post each cart add as a remote record
//!
//! [session]
//! profile_user_id = 1        # used when the token carries no user id
//!
//! [storage]
//! data_dir = "/var/lib/bazaar"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use bazaar_core::UserId;

use crate::error::{ClientError, ClientResult};

/// Default origin of the remote store API.
pub const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com";

// =============================================================================
// API Settings
// =============================================================================

/// Remote API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Origin every request path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds. `None` waits indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Mirror each local cart add as a remote cart record.
    #[serde(default)]
    pub mirror_remote: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: None,
            mirror_remote: false,
        }
    }
}

impl ApiSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

// =============================================================================
// Session Settings
// =============================================================================

/// Login settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Profile fetched after login when the token does not name a user.
    #[serde(default = "default_profile_user_id")]
    pub profile_user_id: UserId,
}

fn default_profile_user_id() -> UserId {
    1
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            profile_user_id: default_profile_user_id(),
        }
    }
}

// =============================================================================
// Storage Settings
// =============================================================================

/// Where durable client state lives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Data directory. Falls back to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl StorageSettings {
    /// Resolved data directory, `None` when no home directory is known.
    pub fn resolved_data_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
    }
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration pointing at a specific origin, everything else default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        ClientConfig {
            api: ApiSettings {
                base_url: base_url.into(),
                ..ApiSettings::default()
            },
            ..Self::default()
        }
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (config.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load client config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        let url = Url::parse(&self.api.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "Base URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == Some(0) {
            return Err(ClientError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.session.profile_user_id == 0 {
            return Err(ClientError::InvalidConfig(
                "profile_user_id must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies overrides from an environment lookup.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("BAZAAR_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(secs) = lookup("BAZAAR_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(s) => self.api.timeout_secs = Some(s),
                Err(_) => warn!(value = %secs, "Ignoring non-numeric BAZAAR_TIMEOUT_SECS"),
            }
        }

        if let Some(id) = lookup("BAZAAR_PROFILE_USER_ID") {
            match id.parse::<UserId>() {
                Ok(id) => self.session.profile_user_id = id,
                Err(_) => warn!(value = %id, "Ignoring non-numeric BAZAAR_PROFILE_USER_ID"),
            }
        }

        if let Some(dir) = lookup("BAZAAR_DATA_DIR") {
            self.storage.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(flag) = lookup("BAZAAR_MIRROR_REMOTE") {
            match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.api.mirror_remote = true,
                "0" | "false" | "no" | "off" => self.api.mirror_remote = false,
                _ => warn!(value = %flag, "Unknown BAZAAR_MIRROR_REMOTE value"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }

    pub fn profile_user_id(&self) -> UserId {
        self.session.profile_user_id
    }

    pub fn mirror_remote(&self) -> bool {
        self.api.mirror_remote
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "bazaar", "storefront")
}
