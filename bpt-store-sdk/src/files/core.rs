use bytes::Bytes;
use reqwest::Method;
use tracing::debug;

use crate::{Connection, RequestOptions, errors::Result, util::check_http_status};

/// File operations of the service, bound to a [`Connection`].
///
/// Link builders are pure string operations. Network operations go through
/// [`Connection::request`], so they log in lazily and retry on `401`.
///
/// Returned by [`Connection::files()`].
#[derive(Debug)]
pub struct FileResource<'a> {
    pub(crate) connection: &'a mut Connection,
}

impl<'a> FileResource<'a> {
    /// Equivalent to `connection.files()`.
    pub fn new(connection: &'a mut Connection) -> FileResource<'a> {
        FileResource { connection }
    }

    /// Public link of a file, addressed by content hash. No network call.
    ///
    /// ```
    /// # use bpt_store::{ClientConfig, Connection};
    /// let config = ClientConfig::builder().login("a").password("b").build()?;
    /// let mut conn = Connection::new(config)?;
    /// assert_eq!(
    ///     conn.files().public_url("abc123"),
    ///     "https://api.bpt-store.com/api/v1/files/abc123"
    /// );
    /// # Ok::<_, bpt_store::BuildError>(())
    /// ```
    pub fn public_url(&self, hash: &str) -> String {
        self.connection.resolve_aliases(&format!("{{baseUrl}}/files/{hash}"))
    }

    /// Private link of a file, addressed by uuid and scoped to the session's user.
    /// No network call; the `{userUuid}` segment is empty until a login has happened.
    pub fn private_url(&self, uuid: &str) -> String {
        self.connection.resolve_aliases(&format!("{{baseUrl}}/users/{{userUuid}}/files/{uuid}"))
    }

    /// Fetch a private file's contents (authenticated).
    pub async fn download(&mut self, uuid: &str) -> Result<Bytes> {
        let uri = format!("users/{{userUuid}}/files/{uuid}");
        let response = self
            .connection
            .request(Method::GET, &uri, RequestOptions::new())
            .await?;
        Ok(response.bytes().await?)
    }

    /// Fetch a public file's contents. No `Authorization` header and no login.
    pub async fn download_public(&self, hash: &str) -> Result<Bytes> {
        let url = self.public_url(hash);
        debug!(%url, "Fetching public file");
        let response = self.connection.http.get(url).send().await?;
        let response = check_http_status(response).await?;
        Ok(response.bytes().await?)
    }
}
