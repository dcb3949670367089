//! Client configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SESSION_FILE: &str = ".netwatch/session.json";

pub const ENV_API_BASE_URL: &str = "NETWATCH_API_BASE_URL";
pub const ENV_API_TIMEOUT_SECS: &str = "NETWATCH_API_TIMEOUT_SECS";
pub const ENV_SESSION_FILE: &str = "NETWATCH_SESSION_FILE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix for every REST path, without a trailing slash.
    pub base_url: String,
    /// Whole-request timeout applied to every call.
    pub timeout: Duration,
    /// Where [`FileStorage`](crate::state::session::FileStorage) keeps the token and user record.
    pub session_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
            session_file: default_session_file(),
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `NETWATCH_API_BASE_URL`: default `http://localhost:5000/api`
    /// - `NETWATCH_API_TIMEOUT_SECS`: default 10
    /// - `NETWATCH_SESSION_FILE`: default `$HOME/.netwatch/session.json`
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var(ENV_API_BASE_URL)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| DEFAULT_API_BASE_URL.to_owned(), |v| normalize_base_url(&v));
        let timeout = Duration::from_secs(env_parse_u64(ENV_API_TIMEOUT_SECS, DEFAULT_API_TIMEOUT_SECS));
        let session_file = std::env::var_os(ENV_SESSION_FILE)
            .filter(|v| !v.is_empty())
            .map_or_else(default_session_file, PathBuf::from);

        Self { base_url, timeout, session_file }
    }

    /// Replace the base URL, dropping any trailing slash.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_session_file(mut self, path: PathBuf) -> Self {
        self.session_file = path;
        self
    }
}

pub(crate) fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

fn default_session_file() -> PathBuf {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE), |home| PathBuf::from(home).join(DEFAULT_SESSION_FILE))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
