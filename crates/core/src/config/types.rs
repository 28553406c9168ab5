use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub poller: PollerConfig,
}

/// Backend API location
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Scheme and host, without port (e.g., "http://localhost")
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl BackendConfig {
    /// Base URL the transport prefixes every path with.
    pub fn base_url(&self) -> String {
        format!("{}:{}", self.url.trim_end_matches('/'), self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs as u64)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            port: default_port(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_url() -> String {
    "http://localhost".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout() -> u32 {
    30
}

/// Job status poller configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PollerConfig {
    /// Seconds to wait between two job list refreshes.
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
}

impl PollerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
        }
    }
}

fn default_interval() -> u64 {
    1
}
