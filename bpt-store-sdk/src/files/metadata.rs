use serde::{Deserialize, Serialize};

/// File record returned by the service after an upload.
///
/// Example response body:
/// ```json
/// {
///   "uuid": "6a29d6bd9267491ab84c6d65280fba1658b6ebbd1689275b408feab2f187e367",
///   "name": "Example_File.png",
///   "size": 117185,
///   "mimeType": "image/png",
///   "hash": "58b6ebbd1689275b408feab2f187e367"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    /// Identifier used in private links.
    pub uuid: String,
    /// Original file name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Content type detected by the service.
    pub mime_type: String,
    /// Content hash used in public links.
    pub hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_service_payload() {
        let json = r#"{
            "uuid": "6a29d6bd",
            "name": "Example_File.png",
            "size": 117185,
            "mimeType": "image/png",
            "hash": "58b6ebbd"
        }"#;
        let meta: FileMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.mime_type, "image/png");
        assert_eq!(meta.size, 117_185);

        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["mimeType"], "image/png");
        assert!(value.get("mime_type").is_none());
    }
}
