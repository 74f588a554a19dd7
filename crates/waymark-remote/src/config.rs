//! # Remote Configuration
//!
//! Where the hosted table lives and how to authenticate against it.
//!
//! ## Configuration File Format
//! ```toml
//! # [remote] section of waymark.toml
//! url = "https://abcd1234.supabase.co"
//! api_key = "eyJhbGciOi..."
//! table = "locations"        # default
//! trips_table = "trips"      # default
//! timeout_secs = 30          # default
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{RemoteError, RemoteResult};

fn default_table() -> String {
    "locations".to_string()
}

fn default_trips_table() -> String {
    "trips".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Connection settings for the hosted table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Project base URL, e.g. `https://<project>.supabase.co`.
    #[serde(default)]
    pub url: String,

    /// Anonymous (publishable) API key.
    #[serde(default)]
    pub api_key: String,

    /// Table holding location rows.
    #[serde(default = "default_table")]
    pub table: String,

    /// Table holding trip rows.
    #[serde(default = "default_trips_table")]
    pub trips_table: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            url: String::new(),
            api_key: String::new(),
            table: default_table(),
            trips_table: default_trips_table(),
            timeout_secs: default_timeout(),
        }
    }
}

impl RemoteConfig {
    /// Creates a configuration with default table names and timeout.
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        RemoteConfig {
            url: url.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Validates the configuration.
    ///
    /// ## Rules
    /// - `url` parses and uses http or https
    /// - `api_key` is not blank
    /// - table names are not blank
    /// - `timeout_secs` is greater than 0
    pub fn validate(&self) -> RemoteResult<()> {
        if self.url.trim().is_empty() {
            return Err(RemoteError::InvalidConfig("remote url is not set".into()));
        }

        let parsed = Url::parse(self.url.trim())?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(RemoteError::InvalidUrl(format!(
                "remote url must start with http:// or https://, got: {}",
                self.url
            )));
        }

        if self.api_key.trim().is_empty() {
            return Err(RemoteError::InvalidConfig("remote api_key is not set".into()));
        }

        if self.table.trim().is_empty() || self.trips_table.trim().is_empty() {
            return Err(RemoteError::InvalidConfig("table names must not be empty".into()));
        }

        if self.timeout_secs == 0 {
            return Err(RemoteError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}
