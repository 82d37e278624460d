//! The `/file` endpoint.

use std::path::Path;

use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use reqwest::{Method, StatusCode};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::api::Api;
use crate::error::{Error, Result};
use crate::models::StorageObject;
use crate::params::Parameters;
use crate::request::{Payload, Route};

const GET: Route = Route::new(Method::GET, "file", &[StatusCode::OK]);
const UPLOAD: Route = Route::new(Method::POST, "file", &[StatusCode::CREATED]);
const UPDATE: Route = Route::new(Method::PUT, "file", &[StatusCode::OK]);
const DELETE: Route = Route::new(Method::DELETE, "file", &[StatusCode::NO_CONTENT]);
const COPY: Route = Route::new(Method::POST, "file/copy", &[StatusCode::OK]);
const MOVE: Route = Route::new(Method::POST, "file/move", &[StatusCode::OK]);
const RENAME: Route = Route::new(Method::POST, "file/rename", &[StatusCode::CREATED]);

/// File content as it arrives from the service.
pub type ByteStream = BoxStream<'static, Result<Bytes>>;

/// File operations.
#[derive(Debug, Clone)]
pub struct FileApi {
    api: Api,
}

impl FileApi {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    /// Stream the content of a file.
    pub async fn get(&self, params: &Parameters) -> Result<ByteStream> {
        let response = self.api.send(&GET, params, None).await?;
        Ok(response.bytes_stream().map_err(Error::from).boxed())
    }

    /// Create a new file from `payload`. Never overwrites; use
    /// [`update`](Self::update) or `on_exist=autoname` for that.
    ///
    /// Takes `dir`/`dir_id` and `name`.
    pub async fn upload(&self, params: &Parameters, payload: Payload) -> Result<StorageObject> {
        self.api.call(&UPLOAD, params, Some(payload)).await
    }

    /// Replace the content of an existing file, or create it.
    pub async fn update(&self, params: &Parameters, payload: Payload) -> Result<StorageObject> {
        self.api.call(&UPDATE, params, Some(payload)).await
    }

    pub async fn delete(&self, params: &Parameters) -> Result<()> {
        self.api.send(&DELETE, params, None).await?;
        Ok(())
    }

    /// Copy `src`/`src_id` to `dst`/`dst_id`.
    pub async fn copy(&self, params: &Parameters) -> Result<StorageObject> {
        self.api.call(&COPY, params, None).await
    }

    /// Move `src`/`src_id` to `dst`/`dst_id`.
    pub async fn move_to(&self, params: &Parameters) -> Result<StorageObject> {
        self.api.call(&MOVE, params, None).await
    }

    /// Rename `path`/`pid` to `name`.
    pub async fn rename(&self, params: &Parameters) -> Result<StorageObject> {
        self.api.call(&RENAME, params, None).await
    }

    /// Upload a local file without reading it into memory.
    ///
    /// `name` defaults to the local file name and the content type is guessed
    /// from it.
    pub async fn upload_path<P: AsRef<Path>>(&self, local_path: P, params: Parameters) -> Result<StorageObject> {
        let local_path = local_path.as_ref();
        let params = if params.get("name").is_some() {
            params
        } else {
            let filename = local_path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or(Error::MissingParameter("name"))?;
            params.name(filename)
        };

        let file = File::open(local_path).await?;
        let file_size = file.metadata().await?.len();
        let mime_type = mime_guess::from_path(params.get("name").unwrap_or_default())
            .first_or_octet_stream()
            .to_string();

        let payload = Payload::from_reader(file)
            .with_content_type(mime_type)
            .with_length(file_size);
        self.upload(&params, payload).await
    }

    /// Stream a file to `destination` and return the number of bytes written.
    pub async fn download_to<P: AsRef<Path>>(&self, params: &Parameters, destination: P) -> Result<u64> {
        let mut stream = self.get(params).await?;
        let mut file = File::create(destination.as_ref()).await?;
        let mut written = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }

        file.flush().await?;
        Ok(written)
    }
}
