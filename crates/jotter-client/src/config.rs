//! Client configuration.
//!
//! Configuration comes from code or from environment variables
//! (`JOTTER_*` prefixed). The binary loads a `.env` file first, so the same
//! variables can live there.
//!
//! # Example
//!
//! ```rust,no_run
//! use jotter_client::config::ClientConfig;
//!
//! let config = ClientConfig::from_env();
//! config.validate().expect("invalid configuration");
//! ```

use std::env;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use jotter_core::{defaults, Error, Result};

/// Base URL of the notes API.
pub const ENV_API_URL: &str = "JOTTER_API_URL";

/// Optional whole-request timeout in seconds. Unset means transport defaults.
pub const ENV_TIMEOUT_SECS: &str = "JOTTER_TIMEOUT_SECS";

/// Delay before the login-required signal after a 403.
pub const ENV_LOGIN_REDIRECT_DELAY_MS: &str = "JOTTER_LOGIN_REDIRECT_DELAY_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the notes API, without trailing path.
    pub base_url: String,
    /// Request timeout in seconds; `None` keeps reqwest's defaults.
    pub timeout_secs: Option<u64>,
    /// Delay between an authorization failure and the login-required event.
    pub login_redirect_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::API_URL.to_string(),
            timeout_secs: None,
            login_redirect_delay_ms: defaults::LOGIN_REDIRECT_DELAY_MS,
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at `base_url`, everything else default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load from environment variables, falling back to defaults.
    ///
    /// Unparseable numbers fall back to their defaults rather than failing.
    pub fn from_env() -> Self {
        let config = Self {
            base_url: env::var(ENV_API_URL).unwrap_or_else(|_| defaults::API_URL.to_string()),
            timeout_secs: env::var(ENV_TIMEOUT_SECS)
                .ok()
                .and_then(|v| v.parse::<u64>().ok()),
            login_redirect_delay_ms: env::var(ENV_LOGIN_REDIRECT_DELAY_MS)
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(defaults::LOGIN_REDIRECT_DELAY_MS),
        };
        debug!(
            subsystem = "client",
            component = "config",
            base_url = %config.base_url,
            timeout_secs = ?config.timeout_secs,
            login_redirect_delay_ms = config.login_redirect_delay_ms,
            "Loaded client configuration from environment"
        );
        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::Config("base_url cannot be empty".to_string()));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "base_url must start with http:// or https://, got: {}",
                self.base_url
            )));
        }

        if self.timeout_secs == Some(0) {
            return Err(Error::Config(
                "timeout_secs must be greater than zero when set".to_string(),
            ));
        }

        Ok(())
    }

    pub fn login_redirect_delay(&self) -> Duration {
        Duration::from_millis(self.login_redirect_delay_ms)
    }

    /// Join an API path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Build the shared HTTP client.
    pub fn http_client(&self) -> Result<Client> {
        let mut builder = Client::builder();
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            subsystem = "client",
            component = "config",
            base_url = %self.base_url,
            "Initializing notes API client"
        );
        Ok(client)
    }
}
