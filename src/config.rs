//! Client configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:8083";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

const SESSION_DIR: &str = ".gamestack";
const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Gateway base URL without a trailing slash.
    pub api_url: String,
    /// File backing the persisted session.
    pub session_file: PathBuf,
    pub timeouts: HttpTimeouts,
    /// Whether requests carry `X-User-Id` alongside the bearer token.
    pub send_user_id: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            session_file: default_session_file(),
            timeouts: HttpTimeouts::default(),
            send_user_id: true,
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `GAMESTACK_API_URL`: default `http://localhost:8083`
    /// - `GAMESTACK_SESSION_FILE`: default `$HOME/.gamestack/session.json`
    /// - `GAMESTACK_REQUEST_TIMEOUT_SECS`: default 30
    /// - `GAMESTACK_CONNECT_TIMEOUT_SECS`: default 10
    /// - `GAMESTACK_SEND_USER_ID`: boolean, default on
    #[must_use]
    pub fn from_env() -> Self {
        let api_url = std::env::var("GAMESTACK_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| DEFAULT_API_URL.to_owned(), |v| normalize_base_url(&v));
        let session_file = std::env::var_os("GAMESTACK_SESSION_FILE")
            .filter(|v| !v.is_empty())
            .map_or_else(default_session_file, PathBuf::from);
        let timeouts = HttpTimeouts {
            request_secs: env_parse_u64("GAMESTACK_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("GAMESTACK_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        let send_user_id = env_bool("GAMESTACK_SEND_USER_ID").unwrap_or(true);

        Self { api_url, session_file, timeouts, send_user_id }
    }

    /// Replace the base URL, normalizing the trailing slash.
    #[must_use]
    pub fn with_api_url(mut self, url: &str) -> Self {
        self.api_url = normalize_base_url(url);
        self
    }

    #[must_use]
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = path.into();
        self
    }
}

pub(crate) fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn default_session_file() -> PathBuf {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map_or_else(|| PathBuf::from("."), PathBuf::from);
    home.join(SESSION_DIR).join(SESSION_FILE)
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
