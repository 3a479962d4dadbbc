//! Common imports for quick starts.

// Common
pub use crate::{BuildError, Error, Result};

// Configuration and transport
pub use crate::{ClientConfig, ClientConfigBuilder, Connection, RequestOptions, Session};

// File operations
pub use crate::{FileMetadata, FileResource, FormField};

// HTTP vocabulary
pub use crate::{Method, StatusCode};
