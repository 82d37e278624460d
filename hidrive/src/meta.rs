//! The `/meta` endpoint.

use reqwest::{Method, StatusCode};

use crate::api::Api;
use crate::error::Result;
use crate::models::StorageObject;
use crate::params::Parameters;
use crate::request::Route;
use crate::response;

const GET: Route = Route::new(Method::GET, "meta", &[StatusCode::OK]);
const UPDATE: Route = Route::new(Method::PATCH, "meta", &[StatusCode::OK, StatusCode::NO_CONTENT]);

/// Metadata of any filesystem object, independent of its type.
#[derive(Debug, Clone)]
pub struct MetaApi {
    api: Api,
}

impl MetaApi {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    pub async fn get(&self, params: &Parameters) -> Result<StorageObject> {
        self.api.call(&GET, params, None).await
    }

    /// Change metadata such as `mtime`.
    ///
    /// Returns `None` when the service answers `204 No Content`.
    pub async fn update(&self, params: &Parameters) -> Result<Option<StorageObject>> {
        let response = self.api.send(&UPDATE, params, None).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        response::decode(response).await.map(Some)
    }
}
