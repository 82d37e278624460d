//! Request construction.
//!
//! Turns a base endpoint, a resource path and a [`Parameters`] set into a
//! [`reqwest::Request`]. No network access happens here.

use std::fmt;

use bytes::Bytes;
use reqwest::header::{HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Body, Method, Request, StatusCode, Url};
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;

use crate::error::{Error, Result};
use crate::params::Parameters;

/// One HiDrive operation: how to call it and which statuses mean success.
#[derive(Debug, Clone)]
pub struct Route {
    pub method: Method,
    /// Path below the endpoint, e.g. `dir` or `file/copy`.
    pub resource: &'static str,
    pub expected: &'static [StatusCode],
}

impl Route {
    pub const fn new(method: Method, resource: &'static str, expected: &'static [StatusCode]) -> Self {
        Self {
            method,
            resource,
            expected,
        }
    }
}

/// A request body that is handed to the transport without transformation.
///
/// Readers are streamed chunk by chunk, so uploads never sit in memory as a
/// whole.
pub struct Payload {
    body: Body,
    content_type: Option<String>,
    length: Option<u64>,
}

impl Payload {
    /// Stream the contents of `reader`.
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncRead + Send + Sync + 'static,
    {
        Self {
            body: Body::wrap_stream(ReaderStream::new(reader)),
            content_type: None,
            length: None,
        }
    }

    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        let length = bytes.len() as u64;
        Self {
            body: Body::from(bytes),
            content_type: None,
            length: Some(length),
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Announce the body size up front instead of using chunked encoding.
    #[must_use]
    pub fn with_length(mut self, length: u64) -> Self {
        self.length = Some(length);
        self
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload")
            .field("content_type", &self.content_type)
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

/// Join `endpoint` and `resource` with exactly one separator.
pub fn resource_url(endpoint: &str, resource: &str) -> Result<Url> {
    let resource = resource.trim_start_matches('/');
    if resource.is_empty() {
        return Err(Error::MissingParameter("resource"));
    }
    let url = Url::parse(&format!("{}/{}", endpoint.trim_end_matches('/'), resource))?;
    Ok(url)
}

/// Build the request for `route` with `params` as its query string.
///
/// `GET` and `DELETE` never carry a body; a payload passed with them is dropped.
pub fn build(endpoint: &str, route: &Route, params: &Parameters, payload: Option<Payload>) -> Result<Request> {
    let mut url = resource_url(endpoint, route.resource)?;
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params.iter());
    }

    let mut request = Request::new(route.method.clone(), url);

    let accepts_body = !matches!(route.method, Method::GET | Method::DELETE | Method::HEAD);
    if let Some(payload) = payload.filter(|_| accepts_body) {
        let headers = request.headers_mut();
        if let Some(content_type) = payload.content_type.as_deref() {
            let value = HeaderValue::from_str(content_type)
                .map_err(|_| Error::Config(format!("invalid content type: {content_type}")))?;
            headers.insert(CONTENT_TYPE, value);
        }
        if let Some(length) = payload.length {
            headers.insert(CONTENT_LENGTH, HeaderValue::from(length));
        }
        *request.body_mut() = Some(payload.body);
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIR_GET: Route = Route::new(Method::GET, "dir", &[StatusCode::OK]);
    const FILE_POST: Route = Route::new(Method::POST, "file", &[StatusCode::CREATED]);

    #[test]
    fn test_single_separator() {
        let url = resource_url("https://api.example.com/2.1/", "/dir").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/2.1/dir");

        let url = resource_url("https://api.example.com/2.1", "file/copy").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/2.1/file/copy");
    }

    #[test]
    fn test_empty_resource_is_rejected() {
        let err = resource_url("https://api.example.com/2.1", "").unwrap_err();
        assert!(matches!(err, Error::MissingParameter("resource")));
    }

    #[test]
    fn test_invalid_endpoint() {
        let err = resource_url("not a url", "dir").unwrap_err();
        assert!(matches!(err, Error::InvalidEndpoint(_)));
    }

    #[test]
    fn test_query_is_percent_encoded_once() {
        let params = Parameters::new().path("/public/my docs/a&b").fields(&["path", "size"]);
        let request = build("https://api.example.com/2.1", &DIR_GET, &params, None).unwrap();

        assert_eq!(request.method(), Method::GET);
        let query = request.url().query().unwrap();
        assert!(!query.contains("%25"), "double encoded: {query}");

        let pairs: Vec<(String, String)> = request.url().query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("path".to_string(), "/public/my docs/a&b".to_string()),
                ("fields".to_string(), "path,size".to_string()),
            ]
        );
    }

    #[test]
    fn test_no_query_without_params() {
        let request = build("https://api.example.com/2.1", &DIR_GET, &Parameters::new(), None).unwrap();
        assert_eq!(request.url().as_str(), "https://api.example.com/2.1/dir");
    }

    #[test]
    fn test_get_drops_payload() {
        let request = build(
            "https://api.example.com/2.1",
            &DIR_GET,
            &Parameters::new(),
            Some(Payload::from_bytes("ignored")),
        )
        .unwrap();
        assert!(request.body().is_none());
    }

    #[test]
    fn test_post_attaches_payload_headers() {
        let payload = Payload::from_bytes("hello").with_content_type("text/plain");
        let request = build(
            "https://api.example.com/2.1",
            &FILE_POST,
            &Parameters::new().dir("/public").name("hello.txt"),
            Some(payload),
        )
        .unwrap();

        assert_eq!(request.body().and_then(|b| b.as_bytes()), Some(&b"hello"[..]));
        assert_eq!(request.headers()[CONTENT_TYPE], "text/plain");
        assert_eq!(request.headers()[CONTENT_LENGTH], "5");
    }

    #[test]
    fn test_reader_payload_is_streamed() {
        let payload = Payload::from_reader(std::io::Cursor::new(vec![0u8; 16]));
        let request = build("https://api.example.com/2.1", &FILE_POST, &Parameters::new(), Some(payload)).unwrap();

        // Streaming bodies expose no in-memory buffer.
        assert!(request.body().unwrap().as_bytes().is_none());
        assert!(request.headers().get(CONTENT_LENGTH).is_none());
    }
}
