//! HiDrive API client.

use crate::api::Api;
use crate::config::ClientConfig;
use crate::dir::DirApi;
use crate::error::Result;
use crate::file::FileApi;
use crate::meta::MetaApi;
use crate::share::ShareApi;
use crate::sharelink::SharelinkApi;
use crate::transport::Transport;

/// Client for the HiDrive REST API.
///
/// All resource APIs handed out by one client share its endpoint and
/// transport.
#[derive(Debug, Clone)]
pub struct HiDriveClient {
    api: Api,
}

impl HiDriveClient {
    /// Create a new HiDriveClient.
    ///
    /// # Arguments
    /// * `transport` - Transport that attaches authentication to requests
    /// * `endpoint` - API base URL, or `""` for the default
    pub fn new<T>(transport: T, endpoint: &str) -> Self
    where
        T: Transport + 'static,
    {
        Self {
            api: Api::new(transport, endpoint),
        }
    }

    /// Create a client with the transport described by `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(config.build_transport()?, &config.endpoint))
    }

    pub fn endpoint(&self) -> &str {
        self.api.endpoint()
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    pub fn dir(&self) -> DirApi {
        DirApi::new(self.api.clone())
    }

    pub fn file(&self) -> FileApi {
        FileApi::new(self.api.clone())
    }

    pub fn meta(&self) -> MetaApi {
        MetaApi::new(self.api.clone())
    }

    pub fn share(&self) -> ShareApi {
        ShareApi::new(self.api.clone())
    }

    pub fn sharelink(&self) -> SharelinkApi {
        SharelinkApi::new(self.api.clone())
    }
}
