// ABOUTME: BridgeConfig - engine location, credentials, timeouts and the
// ABOUTME: roles allowed to run administrative and diagnostic operations.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::Role;
use crate::error::ConfigError;

pub const ENV_ENGINE_URL: &str = "FLOWBRIDGE_ENGINE_URL";
pub const ENV_API_KEY: &str = "FLOWBRIDGE_API_KEY";
pub const ENV_TIMEOUT_MS: &str = "FLOWBRIDGE_TIMEOUT_MS";

const DEFAULT_ENGINE_URL: &str = "http://localhost:5678";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_API_KEY_HEADER: &str = "X-N8N-API-KEY";

/// Configuration for the tool bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Base URL of the automation engine; catalog endpoints are appended.
    pub engine_url: String,

    /// Optional API key sent with every call.
    pub api_key: Option<String>,

    /// Header carrying the API key.
    pub api_key_header: String,

    /// Per-call timeout in milliseconds.
    pub timeout_ms: u64,

    /// Roles allowed to clear the tool cache.
    pub admin_roles: Vec<Role>,

    /// Roles allowed to list the full catalog.
    pub diagnostic_roles: Vec<Role>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            engine_url: DEFAULT_ENGINE_URL.to_string(),
            api_key: None,
            api_key_header: DEFAULT_API_KEY_HEADER.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            admin_roles: vec![Role::Admin],
            diagnostic_roles: vec![Role::Admin, Role::Ceo],
        }
    }
}

impl BridgeConfig {
    /// Defaults overridden by `FLOWBRIDGE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by values from an arbitrary variable source.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_ENGINE_URL).filter(|v| !v.trim().is_empty()) {
            config.engine_url = url.trim().to_string();
        }
        if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.is_empty()) {
            config.api_key = Some(key);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            config.timeout_ms = raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
                key: ENV_TIMEOUT_MS.to_string(),
                message: format!("{}", e),
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file; missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_engine_url(mut self, url: impl Into<String>) -> Self {
        self.engine_url = url.into();
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = timeout.as_millis().try_into().unwrap_or(u64::MAX);
        self
    }

    pub fn with_admin_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.admin_roles = roles.into_iter().collect();
        self
    }

    pub fn with_diagnostic_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.diagnostic_roles = roles.into_iter().collect();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Engine base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.engine_url.trim_end_matches('/')
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timeout_ms".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        reqwest::Url::parse(&self.engine_url).map_err(|e| ConfigError::InvalidValue {
            key: "engine_url".to_string(),
            message: format!("{}", e),
        })?;
        Ok(())
    }
}
