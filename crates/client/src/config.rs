//! Client configuration loaded from environment variables.

use std::time::Duration;

/// Connection and polling configuration for the scan service client.
///
/// All fields have defaults suitable for local development. In
/// production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base API URL, e.g. `http://localhost:8000/api`.
    pub api_url: String,
    /// Delay between status polls.
    pub poll_interval: Duration,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000/api".into(),
            poll_interval: Duration::from_millis(2000),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                         | Default                     |
    /// |---------------------------------|-----------------------------|
    /// | `FOXHOUND_API_URL`              | `http://localhost:8000/api` |
    /// | `FOXHOUND_POLL_INTERVAL_MS`     | `2000`                      |
    /// | `FOXHOUND_REQUEST_TIMEOUT_SECS` | `30`                        |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_url = std::env::var("FOXHOUND_API_URL").unwrap_or(defaults.api_url);

        let poll_interval_ms: u64 = std::env::var("FOXHOUND_POLL_INTERVAL_MS")
            .unwrap_or_else(|_| "2000".into())
            .parse()
            .expect("FOXHOUND_POLL_INTERVAL_MS must be a valid u64");

        let request_timeout_secs: u64 = std::env::var("FOXHOUND_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("FOXHOUND_REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            api_url,
            poll_interval: Duration::from_millis(poll_interval_ms),
            request_timeout: Duration::from_secs(request_timeout_secs),
        }
    }
}
