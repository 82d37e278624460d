//! The seam between request plumbing and the network.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Request, Response};

use crate::error::Result;

/// Executes fully built requests.
///
/// The transport owns connection pooling and authentication. A configured
/// [`reqwest::Client`] (see [`ClientConfig`](crate::ClientConfig)) is the usual
/// implementation; wrap it to attach refreshed OAuth2 tokens.
///
/// Failures are returned as they happen. Nothing here retries.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: Request) -> Result<Response>;
}

#[async_trait]
impl Transport for Client {
    async fn execute(&self, request: Request) -> Result<Response> {
        Ok(Client::execute(self, request).await?)
    }
}

#[async_trait]
impl<T> Transport for Arc<T>
where
    T: Transport + ?Sized,
{
    async fn execute(&self, request: Request) -> Result<Response> {
        (**self).execute(request).await
    }
}
