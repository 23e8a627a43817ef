//! Editor configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_LAYOUT_PATH: &str = "kiosk-layout.json";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown KIOSK_STORE: {0} (expected 'file' or 'http')")]
    UnknownStore(String),
    #[error("{var} is required when KIOSK_STORE=http")]
    Missing { var: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpStoreConfig {
    pub base_url: String,
    pub building_id: String,
    pub token: Option<String>,
    pub timeouts: HttpTimeouts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    File { path: PathBuf },
    Http(HttpStoreConfig),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub store: StoreConfig,
}

impl EditorConfig {
    /// Build typed editor config from environment variables.
    ///
    /// Optional:
    /// - `KIOSK_STORE`: `file` (default) or `http`
    /// - `KIOSK_LAYOUT_PATH`: default `kiosk-layout.json`
    /// - `KIOSK_API_TOKEN_ENV`: names the env var containing the bearer token
    /// - `KIOSK_HTTP_TIMEOUT_SECS`: default 30
    /// - `KIOSK_HTTP_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// Required when `KIOSK_STORE=http`:
    /// - `KIOSK_API_URL`
    /// - `KIOSK_BUILDING_ID`
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an unknown store kind or a missing
    /// required variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let store = match std::env::var("KIOSK_STORE").ok().as_deref().unwrap_or("file") {
            "file" => StoreConfig::File {
                path: std::env::var("KIOSK_LAYOUT_PATH")
                    .map_or_else(|_| PathBuf::from(DEFAULT_LAYOUT_PATH), PathBuf::from),
            },
            "http" => StoreConfig::Http(http_from_env()?),
            other => return Err(ConfigError::UnknownStore(other.to_string())),
        };
        Ok(Self { store })
    }
}

fn http_from_env() -> Result<HttpStoreConfig, ConfigError> {
    let base_url = require("KIOSK_API_URL")?.trim_end_matches('/').to_string();
    let building_id = require("KIOSK_BUILDING_ID")?;
    let token = std::env::var("KIOSK_API_TOKEN_ENV")
        .ok()
        .and_then(|var| std::env::var(var).ok())
        .filter(|t| !t.is_empty());
    let timeouts = HttpTimeouts {
        request_secs: env_parse("KIOSK_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS),
        connect_secs: env_parse("KIOSK_HTTP_CONNECT_TIMEOUT_SECS", DEFAULT_HTTP_CONNECT_TIMEOUT_SECS),
    };
    Ok(HttpStoreConfig { base_url, building_id, token, timeouts })
}

fn require(var: &str) -> Result<String, ConfigError> {
    std::env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::Missing { var: var.to_string() })
}

/// Parse an env var, falling back to `default` when absent or malformed.
pub(crate) fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
