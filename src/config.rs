//! Environment-driven configuration.
//!
//! Values come from the process environment (seeded from `.env` on desktop
//! builds) and fall back to the bundled `assets/config.env`, which is the only
//! source on wasm where there is no process environment.

use std::collections::HashMap;

/// Bundled config for web and mobile builds
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

pub const API_BASE_VAR: &str = "FOUNDRY_CHAT_API_BASE";
pub const BIND_VAR: &str = "FOUNDRY_CHAT_BIND";

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

#[cfg(not(target_arch = "wasm32"))]
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!(error = %err, "ignoring unreadable .env"),
    }
}

#[cfg(target_arch = "wasm32")]
pub fn load_dotenv() {}

/// Parses `KEY=VALUE` lines, skipping blanks and `#` comments.
pub fn parse_env_lines(contents: &str) -> HashMap<String, String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}

/// Looks a key up in the environment first, then in the bundled config.
pub fn lookup(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .or_else(|| parse_env_lines(BUNDLED_CONFIG).remove(key))
        .filter(|value| !value.is_empty())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL including the `/api` prefix.
    pub api_base: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(lookup)
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let api_base = get(API_BASE_VAR).unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }
}

#[cfg(feature = "server")]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: std::net::SocketAddr,
}

#[cfg(feature = "server")]
impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(lookup)
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        use anyhow::Context;

        let raw = get(BIND_VAR).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = raw
            .parse()
            .with_context(|| format!("{BIND_VAR} is not a socket address: {raw}"))?;
        Ok(Self { bind })
    }
}
