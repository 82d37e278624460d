//! The request pipeline shared by every resource API.

use std::fmt;
use std::sync::Arc;

use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::params::Parameters;
use crate::request::{self, Payload, Route};
use crate::response;
use crate::transport::Transport;

/// Default HiDrive API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.hidrive.strato.com/2.1";

/// HiDrive OAuth2 authorization URL.
pub const AUTH_URL: &str = "https://my.hidrive.com/client/authorize";

/// HiDrive OAuth2 token URL.
pub const TOKEN_URL: &str = "https://my.hidrive.com/oauth2/token";

/// Base endpoint plus the transport that reaches it.
///
/// Cloning is cheap and clones share the transport. Nothing in here changes
/// after construction, so one `Api` can serve concurrent calls.
#[derive(Clone)]
pub struct Api {
    endpoint: String,
    transport: Arc<dyn Transport>,
}

impl Api {
    /// Create an `Api` for `endpoint`. An empty endpoint selects
    /// [`DEFAULT_ENDPOINT`].
    pub fn new<T>(transport: T, endpoint: &str) -> Self
    where
        T: Transport + 'static,
    {
        Self::from_shared(Arc::new(transport), endpoint)
    }

    pub fn from_shared(transport: Arc<dyn Transport>, endpoint: &str) -> Self {
        let endpoint = if endpoint.is_empty() {
            DEFAULT_ENDPOINT
        } else {
            endpoint
        };
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build, execute and validate one request.
    pub async fn send(&self, route: &Route, params: &Parameters, payload: Option<Payload>) -> Result<Response> {
        let request = request::build(&self.endpoint, route, params, payload)?;
        log::debug!("{} {}", request.method(), request.url());

        let response = self.transport.execute(request).await?;
        response::validate(response, route.expected).await
    }

    /// [`send`](Self::send), then decode the body as `T`.
    pub async fn call<T>(&self, route: &Route, params: &Parameters, payload: Option<Payload>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send(route, params, payload).await?;
        response::decode(response).await
    }
}

impl fmt::Debug for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Api")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}
