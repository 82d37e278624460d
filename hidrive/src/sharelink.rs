//! The `/sharelink` endpoint: single-file share links.

use reqwest::{Method, StatusCode};

use crate::api::Api;
use crate::error::Result;
use crate::models::{OneOrMany, ShareObject};
use crate::params::Parameters;
use crate::request::Route;

const GET: Route = Route::new(Method::GET, "sharelink", &[StatusCode::OK]);
const CREATE: Route = Route::new(Method::POST, "sharelink", &[StatusCode::CREATED]);
const UPDATE: Route = Route::new(Method::PUT, "sharelink", &[StatusCode::OK]);
const DELETE: Route = Route::new(Method::DELETE, "sharelink", &[StatusCode::NO_CONTENT]);

#[derive(Debug, Clone)]
pub struct SharelinkApi {
    api: Api,
}

impl SharelinkApi {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    pub async fn get(&self, params: &Parameters) -> Result<Vec<ShareObject>> {
        let links: OneOrMany<ShareObject> = self.api.call(&GET, params, None).await?;
        Ok(links.into())
    }

    /// Create a link for the file at `path`/`pid`. The link type is always `file`.
    pub async fn create(&self, params: &Parameters) -> Result<ShareObject> {
        let params = params.clone().kind("file");
        self.api.call(&CREATE, &params, None).await
    }

    pub async fn update(&self, params: &Parameters) -> Result<ShareObject> {
        self.api.call(&UPDATE, params, None).await
    }

    pub async fn delete(&self, params: &Parameters) -> Result<()> {
        self.api.send(&DELETE, params, None).await?;
        Ok(())
    }
}
