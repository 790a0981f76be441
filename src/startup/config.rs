//! Runtime configuration.
//!
//! Built with the `with_*` builder methods or read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use crate::gateway::DEFAULT_API_URL;
use crate::state::SEARCH_DEBOUNCE;

/// Environment variable overriding the backend base URL.
pub const ENV_API_URL: &str = "GASTROLOG_API_URL";
/// Environment variable overriding where the session token is stored.
pub const ENV_TOKEN_PATH: &str = "GASTROLOG_TOKEN_PATH";
/// Environment variable overriding the user-search quiet period, in ms.
pub const ENV_DEBOUNCE_MS: &str = "GASTROLOG_DEBOUNCE_MS";

/// Per-request timeout used unless configured otherwise.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client configuration.
///
/// # Example
///
/// ```ignore
/// use gastrolog::startup::AppConfig;
///
/// let config = AppConfig::default()
///     .with_api_base_url("http://192.168.1.20:8080/api")
///     .with_search_debounce(std::time::Duration::from_millis(150));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Backend base URL, including the `/api` prefix
    pub api_base_url: String,
    /// Quiet period before a user lookup is sent
    pub search_debounce: Duration,
    /// Token file; `None` means the default under the home directory
    pub token_path: Option<PathBuf>,
    /// Timeout applied to every HTTP request
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            search_debounce: SEARCH_DEBOUNCE,
            token_path: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_search_debounce(mut self, delay: Duration) -> Self {
        self.search_debounce = delay;
        self
    }

    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = Some(path.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Defaults overridden by `GASTROLOG_*` environment variables.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            config = config.with_api_base_url(url.trim());
        }
        if let Some(path) = lookup(ENV_TOKEN_PATH).filter(|v| !v.trim().is_empty()) {
            config = config.with_token_path(path.trim());
        }
        if let Some(raw) = lookup(ENV_DEBOUNCE_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config = config.with_search_debounce(Duration::from_millis(ms)),
                Err(_) => tracing::warn!("Ignoring {}={:?}: not a number", ENV_DEBOUNCE_MS, raw),
            }
        }
        config
    }
}
