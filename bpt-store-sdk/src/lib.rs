#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(any(), deny(clippy::unwrap_used))]

pub mod config;
mod connection;
pub mod errors;
mod files;
mod session;
mod util;

pub mod prelude;

// --- PUBLIC API EXPORTS ---
// Configuration
pub use config::{ClientConfig, ClientConfigBuilder};
// Transport and authentication
pub use connection::core::{AUTH_TOKEN_ALIAS, BASE_URL_ALIAS, Connection, USER_UUID_ALIAS};
pub use connection::options::{Body, FormField, RequestOptions};
pub use session::Session;
// File operations
pub use files::core::FileResource;
pub use files::metadata::FileMetadata;

// Error types
pub use errors::{BuildError, Error, Result};

// Re-exports
pub use bytes::Bytes;
pub use reqwest::{Method, StatusCode};
