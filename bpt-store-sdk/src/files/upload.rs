use std::path::Path;

use reqwest::Method;
use tracing::info;

use super::core::FileResource;
use super::metadata::FileMetadata;
use crate::{
    FormField, RequestOptions,
    errors::{Error, Result},
    util::decode_json,
};

/// Upload endpoint, relative to the base URL.
pub(crate) const UPLOAD_PATH: &str = "users/{userUuid}/files";

/// File name sent when the path has none (e.g. `..`).
const FALLBACK_FILE_NAME: &str = "file";

impl FileResource<'_> {
    /// Upload a local file.
    ///
    /// Reads `path` completely, then POSTs a multipart body to `users/{userUuid}/files`:
    /// - `groupId`: the target file group
    /// - `isPublic`: `1` when the file may be fetched through [`Self::public_url`], `0` otherwise
    /// - `file`: the contents, named after the path and typed by its extension
    ///
    /// A path that cannot be read fails with [`Error::Io`] before any network call.
    ///
    /// # Examples
    /// ```no_run
    /// # async fn ex(conn: &mut bpt_store::Connection) -> bpt_store::Result<()> {
    /// let meta = conn.files().add("./Example_File.png", "1", true).await?;
    /// println!("{} -> {}", meta.name, conn.files().public_url(&meta.hash));
    /// # Ok(()) }
    /// ```
    pub async fn add<P: AsRef<Path>>(
        &mut self,
        path: P,
        group_id: &str,
        is_public: bool,
    ) -> Result<FileMetadata> {
        let path = path.as_ref();
        let contents = tokio::fs::read(path).await.map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let file_name = path
            .file_name()
            .map_or_else(|| FALLBACK_FILE_NAME.to_string(), |n| n.to_string_lossy().into_owned());
        let mime = mime_guess::from_path(path).first_or_octet_stream().to_string();
        let size = contents.len();

        let options = RequestOptions::new().multipart(vec![
            FormField::text("groupId", group_id),
            FormField::text("isPublic", if is_public { "1" } else { "0" }),
            FormField::file("file", file_name, mime, contents),
        ]);

        let response = self
            .connection
            .request(Method::POST, UPLOAD_PATH, options)
            .await?;
        let metadata: FileMetadata = decode_json(response).await?;

        info!(uuid = %metadata.uuid, name = %metadata.name, size, "Uploaded file");
        Ok(metadata)
    }
}
