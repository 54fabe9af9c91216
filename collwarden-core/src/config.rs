//! Startup configuration, read once from the environment.
//!
//! | variable             | default                   |
//! |----------------------|---------------------------|
//! | `LINKWARDEN_URL`     | `http://linkwarden:3000`  |
//! | `LINKWARDEN_TOKEN`   | required                  |
//! | `ROOT_COLLECTION_ID` | required, integer         |
//! | `POLL_INTERVAL`      | `60` seconds              |
//! | `STATE_FILE`         | `./data/user_state.json`  |
//! | `REQUEST_TIMEOUT`    | `10` seconds              |
//! | `LOG_FORMAT`         | `text` (or `json`)        |

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::types::CollectionId;

pub const DEFAULT_BASE_URL: &str = "http://linkwarden:3000";
pub const DEFAULT_STATE_FILE: &str = "./data/user_state.json";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the bookmark service, without trailing slash.
    pub base_url: String,
    /// Bearer token sent on every request.
    pub token: String,
    /// Collection that receives full access; its descendants get read-only.
    pub root_collection: CollectionId,
    pub poll_interval: Duration,
    pub state_path: PathBuf,
    /// Bound on each individual HTTP call.
    pub request_timeout: Duration,
    /// Emit JSON log lines instead of human-readable text.
    pub log_json: bool,
}

impl Config {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let token = var("LINKWARDEN_TOKEN").ok_or(ConfigError::MissingToken)?;

        let root_raw = var("ROOT_COLLECTION_ID").ok_or(ConfigError::MissingRootCollection)?;
        let root_collection = root_raw
            .parse::<i64>()
            .map(CollectionId)
            .map_err(|_| ConfigError::InvalidRootCollection { value: root_raw })?;

        let base_url = var("LINKWARDEN_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let poll_interval = match var("POLL_INTERVAL") {
            Some(value) => parse_seconds(&value)
                .ok_or(ConfigError::InvalidPollInterval { value })?,
            None => DEFAULT_POLL_INTERVAL,
        };

        let request_timeout = match var("REQUEST_TIMEOUT") {
            Some(value) => parse_seconds(&value)
                .ok_or(ConfigError::InvalidRequestTimeout { value })?,
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        let log_json = match var("LOG_FORMAT").as_deref() {
            None | Some("text") => false,
            Some("json") => true,
            Some(other) => {
                return Err(ConfigError::InvalidLogFormat {
                    value: other.to_string(),
                })
            }
        };

        let state_path = var("STATE_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE));

        Ok(Self {
            base_url,
            token,
            root_collection,
            poll_interval,
            state_path,
            request_timeout,
            log_json,
        })
    }
}

fn parse_seconds(value: &str) -> Option<Duration> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
        _ => None,
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("root_collection", &self.root_collection)
            .field("poll_interval", &self.poll_interval)
            .field("state_path", &self.state_path)
            .field("request_timeout", &self.request_timeout)
            .field("log_json", &self.log_json)
            .finish()
    }
}
