//! A local stand-in for the BPT Store API, for tests and demos.
//!
//! [`MockBptStore`] wraps an [`httpmock::MockServer`] and knows the service's wire
//! contract: where `login` lives, what the upload endpoint expects, how files are
//! addressed. Tests register only the exchanges they care about and then count hits.

use bpt_store::{ClientConfig, ClientConfigBuilder, Connection, FileMetadata};
use httpmock::{Method::GET, Method::POST, Mock, MockServer};
use serde_json::json;

// Re-export the core crates
pub use bpt_store;
pub use httpmock;

/// Path prefix the mock serves the versioned API under.
pub const API_PREFIX: &str = "/api/v1";

/// Login accepted by [`MockBptStore::mock_default_login`].
pub const DEFAULT_LOGIN: &str = "tester";
/// Password accepted by [`MockBptStore::mock_default_login`].
pub const DEFAULT_PASSWORD: &str = "correct horse";
/// Token issued by [`MockBptStore::mock_default_login`].
pub const DEFAULT_TOKEN: &str = "token-1";
/// User uuid issued by [`MockBptStore::mock_default_login`].
pub const DEFAULT_USER_UUID: &str = "0f8e6c1a-user";

/// A mock BPT Store API on a random local port.
pub struct MockBptStore {
    server: MockServer,
}

impl MockBptStore {
    /// Start an empty mock. Requests without a matching mock get `404`.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start_async().await,
        }
    }

    /// The underlying mock server, for exchanges not covered by the helpers.
    pub fn server(&self) -> &MockServer {
        &self.server
    }

    /// Absolute path of an API endpoint, e.g. `path("login")` is `/api/v1/login`.
    pub fn path(&self, endpoint: &str) -> String {
        format!("{API_PREFIX}/{}", endpoint.trim_start_matches('/'))
    }

    /// Base URL to configure a client with, ending with `/`.
    pub fn base_url(&self) -> String {
        self.server.url(format!("{API_PREFIX}/"))
    }

    /// A config builder pointed at this mock, with the default credentials set.
    pub fn config_builder(&self) -> ClientConfigBuilder {
        let mut builder = ClientConfig::builder();
        builder
            .login(DEFAULT_LOGIN)
            .password(DEFAULT_PASSWORD)
            .url(self.base_url());
        builder
    }

    /// A fresh, not yet authenticated connection pointed at this mock.
    pub fn connection(&self) -> Connection {
        let config = self
            .config_builder()
            .build()
            .expect("mock base url and default credentials are valid");
        Connection::new(config).expect("default http client builds")
    }

    /// Accept `login`/`password` and answer with `token`/`user_uuid`.
    pub async fn mock_login(
        &self,
        login: &str,
        password: &str,
        token: &str,
        user_uuid: &str,
    ) -> Mock<'_> {
        self.server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(self.path("login"))
                    .json_body(json!({ "login": login, "password": password }));
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({ "authToken": token, "userUuid": user_uuid }));
            })
            .await
    }

    /// [`Self::mock_login`] with the default credentials, token and user uuid.
    pub async fn mock_default_login(&self) -> Mock<'_> {
        self.mock_login(
            DEFAULT_LOGIN,
            DEFAULT_PASSWORD,
            DEFAULT_TOKEN,
            DEFAULT_USER_UUID,
        )
        .await
    }

    /// Reject every login with `status`.
    pub async fn mock_login_rejected(&self, status: u16) -> Mock<'_> {
        self.server
            .mock_async(|when, then| {
                when.method(POST).path(self.path("login"));
                then.status(status).body("invalid credentials");
            })
            .await
    }

    /// Answer `method` on `endpoint` with `401` when sent with `token`.
    pub async fn mock_unauthorized(
        &self,
        method: httpmock::Method,
        endpoint: &str,
        token: &str,
    ) -> Mock<'_> {
        self.server
            .mock_async(|when, then| {
                when.method(method)
                    .path(self.path(endpoint))
                    .header("authorization", token);
                then.status(401).body("token expired");
            })
            .await
    }

    /// Accept an upload from `user_uuid` authorized with `token` and answer with `metadata`.
    ///
    /// The mock only matches multipart bodies carrying `groupId`, `isPublic` and a `file`
    /// part, so a malformed upload falls through to `404`.
    pub async fn mock_upload(
        &self,
        token: &str,
        user_uuid: &str,
        metadata: &FileMetadata,
    ) -> Mock<'_> {
        self.server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(self.path(&format!("users/{user_uuid}/files")))
                    .header("authorization", token)
                    .header_exists("content-type")
                    .body_contains("name=\"groupId\"")
                    .body_contains("name=\"isPublic\"")
                    .body_contains("name=\"file\"");
                then.status(201)
                    .header("content-type", "application/json")
                    .json_body(json!(metadata));
            })
            .await
    }

    /// Serve a private file to `user_uuid` authorized with `token`.
    pub async fn mock_private_file(
        &self,
        token: &str,
        user_uuid: &str,
        uuid: &str,
        contents: &[u8],
    ) -> Mock<'_> {
        self.server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(self.path(&format!("users/{user_uuid}/files/{uuid}")))
                    .header("authorization", token);
                then.status(200).body(contents);
            })
            .await
    }

    /// Serve a public file by content hash.
    pub async fn mock_public_file(&self, hash: &str, contents: &[u8]) -> Mock<'_> {
        self.server
            .mock_async(|when, then| {
                when.method(GET).path(self.path(&format!("files/{hash}")));
                then.status(200).body(contents);
            })
            .await
    }
}

/// Metadata for a sample upload, as the service would return it.
pub fn sample_metadata(name: &str, size: u64) -> FileMetadata {
    FileMetadata {
        uuid: "6a29d6bd9267491ab84c6d65280fba1658b6ebbd1689275b408feab2f187e367".into(),
        name: name.into(),
        size,
        mime_type: "image/png".into(),
        hash: "58b6ebbd1689275b408feab2f187e367".into(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn base_url_points_at_api_prefix() {
        let store = MockBptStore::start().await;
        let base = store.base_url();
        assert!(base.starts_with("http://"));
        assert!(base.ends_with("/api/v1/"));
        assert_eq!(store.path("/login"), "/api/v1/login");

        let conn = store.connection();
        assert_eq!(conn.config().base_url().as_str(), base);
    }
}
