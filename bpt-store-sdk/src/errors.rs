//! Unified error types for the `bpt-store` crate.
//!
//! This module centralizes all failures that can occur while using the SDK and
//! provides a single top-level [`Error`] enum plus the convenient [`Result`] alias.
//! Errors from lower layers (`reqwest`, URL parsing, file I/O) are mapped into
//! structured variants so callers can handle them precisely.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

// --- Build-Time Error ---

/// Errors that can occur while building a [`crate::ClientConfig`] or a [`crate::Connection`].
#[derive(Debug, Error)]
pub enum BuildError {
    /// A required credential (`login` or `password`) was not supplied.
    #[error("{0} is required")]
    MissingCredential(&'static str),

    /// A configuration value could not be interpreted.
    #[error("Invalid value for `{key}`: {value}")]
    InvalidValue {
        /// Name of the offending option or environment variable.
        key: String,
        /// The rejected raw value.
        value: String,
    },

    /// The resolved base URL is not a valid absolute URL.
    #[error("Invalid base URL: {0}")]
    Url(#[from] url::ParseError),

    /// Failed to build the HTTP client (reqwest configuration).
    #[error("Failed to build the HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

// --- The Main Operational Error Enum ---

/// The crate’s top-level error type.
///
/// It groups failures into high-level categories:
/// - [`Error::Request`]: HTTP transport/server/decoding issues
/// - [`Error::Parse`]: URL parsing failures
/// - [`Error::Authentication`]: the login call was rejected or malformed
/// - [`Error::Build`]: construction of the configuration or client failed
/// - [`Error::Io`]: a local file could not be read
///
/// Most lower-level errors automatically convert into this enum via `From`.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request/response failed (transport, server, JSON).
    #[error("Request failed: {0}")]
    Request(#[from] RequestError),

    /// URL parsing failed while preparing a request.
    #[error("Failed to parse URL: {0}")]
    Parse(#[from] url::ParseError),

    /// Login failed.
    #[error("Authentication error: {0}")]
    Authentication(#[from] AuthError),

    /// Building the configuration or client failed.
    #[error("Client build failed: {0}")]
    Build(#[from] BuildError),

    /// Reading a local file failed. Raised before any network call.
    #[error("Failed to read `{}`: {source}", .path.display())]
    Io {
        /// The path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// The HTTP status carried by this error, if it came from a server response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Request(RequestError::Server { status, .. })
            | Error::Authentication(AuthError::Rejected { status, .. }) => Some(*status),
            Error::Request(RequestError::Transport(e)) => e.status(),
            _ => None,
        }
    }

    /// Returns true if the server answered `401 Unauthorized`.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}

// --- Authentication Error ---

/// Errors originating from the login call.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The service refused the credentials.
    #[error("Login rejected: {status} - {message}")]
    Rejected {
        /// The HTTP status code returned by the login endpoint.
        status: StatusCode,
        /// Server response body captured for context.
        message: String,
    },

    /// The login response did not carry a usable token and user uuid.
    #[error("Malformed login response: {0}")]
    MalformedResponse(String),
}

// --- Request Error ---

/// Transport and server-side HTTP errors.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Network/protocol failure from reqwest (timeouts, TLS, I/O, etc.).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server returned a non-success status. Includes status and body message.
    #[error("Server responded with an error: {status} - {message}")]
    Server {
        /// The HTTP status code returned by the server.
        status: StatusCode,
        /// Short description or the server response body captured for context.
        message: String,
    },

    /// JSON decoding failed when parsing a server response.
    #[error("JSON decode error: {message}")]
    DecodeJson {
        /// Error message from the JSON deserializer.
        message: String,
    },
}

/// A specialized `Result` type for `bpt-store` operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Request(err.into())
    }
}
