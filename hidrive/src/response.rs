//! Response validation and decoding.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{Result, ServiceError};

/// Pass `response` through when its status is one of `expected`.
///
/// Otherwise the body is read and decoded as the service error envelope. A
/// body that is not such an envelope becomes [`Error::Decode`](crate::Error::Decode).
pub async fn validate(response: Response, expected: &[StatusCode]) -> Result<Response> {
    let status = response.status();
    if expected.contains(&status) {
        return Ok(response);
    }

    let body = response.bytes().await?;
    let mut service_error: ServiceError = serde_json::from_slice(&body)?;
    service_error.status = status.as_u16();
    Err(service_error.into())
}

/// Read the whole body and decode it as `T`.
pub async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.bytes().await?;
    log::trace!("decoding {} byte response", body.len());
    decode_slice(&body)
}

pub fn decode_slice<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(body)?)
}
