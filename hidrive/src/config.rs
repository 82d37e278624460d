//! Client configuration.

use std::env;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;

use crate::api::DEFAULT_ENDPOINT;
use crate::error::{Error, Result};

/// Environment variable holding the API endpoint.
pub const ENDPOINT_VAR: &str = "HIDRIVE_ENDPOINT";

/// Environment variable holding an OAuth2 access token.
pub const ACCESS_TOKEN_VAR: &str = "HIDRIVE_ACCESS_TOKEN";

/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_VAR: &str = "HIDRIVE_TIMEOUT_SECS";

/// Settings for the HTTP transport and the API endpoint.
///
/// The access token is used as is; obtaining and refreshing it happens
/// outside this crate.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    pub access_token: Option<String>,
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_token: None,
            timeout: None,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `HIDRIVE_ENDPOINT`, `HIDRIVE_ACCESS_TOKEN` and
    /// `HIDRIVE_TIMEOUT_SECS` when they are set.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(endpoint) = env::var(ENDPOINT_VAR) {
            config.endpoint = endpoint;
        }
        if let Ok(token) = env::var(ACCESS_TOKEN_VAR) {
            config.access_token = Some(token);
        }
        if let Ok(secs) = env::var(TIMEOUT_VAR) {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("{TIMEOUT_VAR} is not a number of seconds: {secs}")))?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build a `reqwest::Client` that sends the bearer token on every request.
    pub fn build_transport(&self) -> Result<Client> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &self.access_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| Error::Config("access token contains invalid characters".to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = Client::builder()
            .default_headers(headers)
            .user_agent(self.user_agent.clone());
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(builder.build()?)
    }
}
