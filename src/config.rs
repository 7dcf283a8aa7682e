use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Prefix shared by every recognised environment variable
pub const ENV_PREFIX: &str = "CINEAI_";

/// Client configuration loaded from `CINEAI_`-prefixed environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the recommendation REST API (`CINEAI_API_URL`)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Location of the durable key/value file
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,

    /// Page size requested from `GET /notifications`
    #[serde(default = "default_notification_limit")]
    pub notification_limit: u32,

    /// Seconds between notification refreshes
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Seconds before a toast expires
    #[serde(default = "default_toast_ttl_secs")]
    pub toast_ttl_secs: u64,
}

fn default_api_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_storage_path() -> PathBuf {
    PathBuf::from(".cineai/storage.json")
}

fn default_notification_limit() -> u32 {
    20
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_toast_ttl_secs() -> u64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            storage_path: default_storage_path(),
            notification_limit: default_notification_limit(),
            poll_interval_secs: default_poll_interval_secs(),
            toast_ttl_secs: default_toast_ttl_secs(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_iter(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_iter<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX)
            .from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn toast_ttl(&self) -> Duration {
        Duration::from_secs(self.toast_ttl_secs)
    }
}
