//! Error types for the hidrive crate.

use std::fmt;

use serde::{de, Deserialize, Deserializer};
use thiserror::Error;

/// Errors that can occur when talking to the HiDrive API.
#[derive(Error, Debug)]
pub enum Error {
    /// A required request parameter was absent or empty. Raised before any I/O.
    #[error("{0}: value should not be empty")]
    MissingParameter(&'static str),

    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The body could not be understood, either on a success response or as
    /// an error envelope.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// The service error carried by this value, if the server rejected the call.
    pub fn as_service(&self) -> Option<&ServiceError> {
        match self {
            Error::Service(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias for [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The `{code, msg}` envelope HiDrive returns with every non-success status.
///
/// Only a JSON object decodes into one; arrays and scalars are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    /// HTTP status of the rejected response.
    pub status: u16,
    pub code: ErrorCode,
    pub message: String,
}

impl<'de> Deserialize<'de> for ServiceError {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Envelope {
            #[serde(default)]
            code: Option<ErrorCode>,
            #[serde(default)]
            msg: Option<String>,
        }

        let object = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        let envelope =
            Envelope::deserialize(serde_json::Value::Object(object)).map_err(de::Error::custom)?;
        Ok(ServiceError {
            status: 0,
            code: envelope.code.unwrap_or_default(),
            message: envelope.msg.unwrap_or_default(),
        })
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error {:?}", self.code.as_str())?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ServiceError {}

/// Service error code, kept exactly as sent.
///
/// The wire format allows both `"404"` and `404`; either way the textual form
/// is preserved and never coerced to an integer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ErrorCode(String);

impl ErrorCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => ErrorCode(s),
            Raw::Number(n) => ErrorCode(n.to_string()),
        })
    }
}
