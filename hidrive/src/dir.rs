//! The `/dir` endpoint.

use reqwest::{Method, StatusCode};

use crate::api::Api;
use crate::error::{Error, Result};
use crate::models::StorageObject;
use crate::params::Parameters;
use crate::request::Route;

const GET: Route = Route::new(Method::GET, "dir", &[StatusCode::OK]);
const CREATE: Route = Route::new(Method::POST, "dir", &[StatusCode::CREATED]);
const DELETE: Route = Route::new(Method::DELETE, "dir", &[StatusCode::NO_CONTENT]);

/// Directory operations.
///
/// `pid` and `path` identify the object; at least one is required. Used
/// together, `pid` names a parent and `path` is relative to it.
#[derive(Debug, Clone)]
pub struct DirApi {
    api: Api,
}

impl DirApi {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    /// Read a directory and, with `members`, its contents.
    ///
    /// Names and paths come back URL-encoded; names are decoded.
    pub async fn get(&self, params: &Parameters) -> Result<StorageObject> {
        self.api.call(&GET, params, None).await
    }

    /// Create one directory. Its parent has to exist already; see
    /// [`create_path`](Self::create_path).
    pub async fn create(&self, params: &Parameters) -> Result<StorageObject> {
        self.api.call(&CREATE, params, None).await
    }

    /// Delete a directory. Set `recursive` to remove non-empty ones.
    pub async fn delete(&self, params: &Parameters) -> Result<()> {
        self.api.send(&DELETE, params, None).await?;
        Ok(())
    }

    /// Create the directory at `path` together with any missing ancestors,
    /// like `mkdir -p`.
    ///
    /// Only `path` is supported, not `pid`. The top-level directory (e.g.
    /// `/public`) is taken to exist. Every other ancestor is probed and
    /// created when the probe fails, one after another. The first failed
    /// create ends the call with that error; ancestors created before it stay
    /// on the server.
    ///
    /// The remaining parameters only apply to the final directory.
    pub async fn create_path(&self, params: &Parameters) -> Result<StorageObject> {
        let path = params
            .get("path")
            .filter(|p| !p.is_empty())
            .ok_or(Error::MissingParameter("path"))?;

        for ancestor in ancestors(path) {
            if self.exists(&ancestor).await {
                log::debug!("{ancestor} exists");
                continue;
            }
            log::debug!("creating missing ancestor {ancestor}");
            self.create(&Parameters::new().path(ancestor)).await?;
        }

        self.create(params).await
    }

    async fn exists(&self, path: &str) -> bool {
        let probe = Parameters::new()
            .members(&["none"])
            .fields(&["path"])
            .path(path);
        self.get(&probe).await.is_ok()
    }
}

/// Absolute paths of the directories between the top level and the leaf of
/// `path`, shallowest first.
pub(crate) fn ancestors(path: &str) -> Vec<String> {
    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    (2..segments.len())
        .map(|k| format!("/{}", segments[..k].join("/")))
        .collect()
}
