//! Client configuration.

use serde::{Deserialize, Serialize};

use crate::client::DEFAULT_RETRIES;
use crate::error::{ClientError, ClientResult};

/// Connection settings for a FortiManager.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL, e.g. `https://fmg.example.net`.
    pub url: String,

    /// API access token.
    #[serde(default)]
    pub token: Option<String>,

    /// Accept self-signed certificates.
    #[serde(default)]
    pub insecure: bool,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per call.
    #[serde(default = "default_retries")]
    pub retries: u32,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retries() -> u32 {
    DEFAULT_RETRIES
}

impl ClientConfig {
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: Some(token.into()),
            insecure: false,
            timeout_secs: default_timeout_secs(),
            retries: default_retries(),
        }
    }

    /// Checks the settings a client cannot work without.
    pub fn validate(&self) -> ClientResult<()> {
        if !(self.url.starts_with("https://") || self.url.starts_with("http://")) {
            return Err(ClientError::Config(format!(
                "url must start with http:// or https://, got '{}'",
                self.url
            )));
        }
        if self.token.as_deref().map_or(true, str::is_empty) {
            return Err(ClientError::Config("token is required".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(ClientError::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    /// JSON-RPC endpoint derived from the base URL.
    pub fn endpoint(&self) -> String {
        format!("{}/jsonrpc", self.url.trim_end_matches('/'))
    }
}
