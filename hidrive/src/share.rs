//! The `/share` endpoint: shared directories and invitations.

use reqwest::{Method, StatusCode};

use crate::api::Api;
use crate::error::Result;
use crate::models::{InviteOutcome, OneOrMany, ShareObject};
use crate::params::Parameters;
use crate::request::Route;

const GET: Route = Route::new(Method::GET, "share", &[StatusCode::OK]);
const CREATE: Route = Route::new(Method::POST, "share", &[StatusCode::CREATED]);
const UPDATE: Route = Route::new(Method::PUT, "share", &[StatusCode::OK]);
const DELETE: Route = Route::new(Method::DELETE, "share", &[StatusCode::NO_CONTENT]);
const INVITE: Route = Route::new(Method::POST, "share/invite", &[StatusCode::OK, StatusCode::MULTI_STATUS]);

/// Directory shares.
///
/// Encrypted shares take `salt`, `share_access_key` and `pw_sharekey`
/// instead of `password`. Those rules are enforced by the service.
#[derive(Debug, Clone)]
pub struct ShareApi {
    api: Api,
}

impl ShareApi {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    /// List shares, optionally narrowed by `id`, `path` or `pid`.
    pub async fn get(&self, params: &Parameters) -> Result<Vec<ShareObject>> {
        let shares: OneOrMany<ShareObject> = self.api.call(&GET, params, None).await?;
        Ok(shares.into())
    }

    pub async fn create(&self, params: &Parameters) -> Result<ShareObject> {
        self.api.call(&CREATE, params, None).await
    }

    pub async fn update(&self, params: &Parameters) -> Result<ShareObject> {
        self.api.call(&UPDATE, params, None).await
    }

    pub async fn delete(&self, params: &Parameters) -> Result<()> {
        self.api.send(&DELETE, params, None).await?;
        Ok(())
    }

    /// Mail the share `id` to every `recipient`.
    ///
    /// A `207 Multi-Status` answer is still a success; check
    /// [`InviteOutcome::failed`] for the recipients that were rejected.
    pub async fn invite(&self, params: &Parameters) -> Result<InviteOutcome> {
        self.api.call(&INVITE, params, None).await
    }
}
