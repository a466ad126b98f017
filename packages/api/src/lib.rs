//! # syno-api
//!
//! Synchronous client for the Synology DSM Web API.
//!
//! Every DSM capability is addressed by a symbolic API name (e.g.
//! `SYNO.FileStation.List`). The [`Client`] resolves names to concrete
//! gateway paths through the `SYNO.API.Info` discovery endpoint, caches
//! the result for its lifetime, and decodes the uniform
//! success/error/data envelope of structured responses.
//!
//! ```ignore
//! use syno_api::{Client, Params};
//! use syno_api::filestation::{FileStationApi, ListRequest};
//!
//! let client = Client::new("https://nas.example:5001")?;
//! client.set_param("_sid", session_token);
//!
//! let fs = FileStationApi::new(&client);
//! let page = fs.list(&ListRequest {
//!     folder_path: "/home".into(),
//!     additional: vec!["size".into(), "time".into()],
//!     ..Default::default()
//! })?;
//! ```
//!
//! The client performs no retries, no pagination and no caching beyond
//! endpoint discovery; callers wanting resilience wrap it.

pub mod auth;
pub mod envelope;
pub mod error;
pub mod filestation;
pub mod registry;

mod client;

// Re-export main types
pub use client::{ByteStream, Client, Params};
pub use envelope::{ApiError, Envelope, SubError};
pub use error::Error;
pub use registry::ApiDescriptor;
