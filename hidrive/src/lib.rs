//! hidrive - A client library for the HiDrive cloud storage REST API.
//!
//! This library provides:
//! - One request pipeline (build, execute, validate, decode) shared by all
//!   resource APIs
//! - Directory, file, metadata, share and share link operations
//! - Recursive directory creation with [`DirApi::create_path`]
//!
//! Authentication is left to the [`Transport`]. A `reqwest::Client` carrying a
//! bearer token is the simplest one; see [`ClientConfig`].
//!
//! # Example
//!
//! ```no_run
//! use hidrive::{ClientConfig, HiDriveClient, Parameters};
//!
//! #[tokio::main]
//! async fn main() -> hidrive::Result<()> {
//!     let config = ClientConfig::default().with_access_token("oauth2-access-token");
//!     let client = HiDriveClient::from_config(&config)?;
//!
//!     let dir = client
//!         .dir()
//!         .get(&Parameters::new().path("/public").members(&["all"]))
//!         .await?;
//!     for member in dir.members.unwrap_or_default() {
//!         println!("{}", member);
//!     }
//!
//!     client
//!         .dir()
//!         .create_path(&Parameters::new().path("/public/backups/2024/june"))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod dir;
pub mod error;
pub mod file;
pub mod meta;
pub mod models;
pub mod params;
pub mod request;
pub mod response;
pub mod share;
pub mod sharelink;
pub mod transport;

// Re-exports for convenience
pub use api::{Api, AUTH_URL, DEFAULT_ENDPOINT, TOKEN_URL};
pub use client::HiDriveClient;
pub use config::ClientConfig;
pub use dir::DirApi;
pub use error::{Error, ErrorCode, Result, ServiceError};
pub use file::{ByteStream, FileApi};
pub use meta::MetaApi;
pub use models::{InviteOutcome, InviteStatus, ObjectKind, ShareObject, ShareStatus, StorageObject, UNKNOWN};
pub use params::Parameters;
pub use request::{Payload, Route};
pub use share::ShareApi;
pub use sharelink::SharelinkApi;
pub use transport::Transport;
