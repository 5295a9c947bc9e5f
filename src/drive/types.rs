//! Drive v3 record types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// MIME type Drive uses to mark folders.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// A file or folder record as returned by `files.list`.
///
/// Only the fields the listing logic reads are typed. Any other field the
/// deployment requests is kept in `extra` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    /// Object id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// File name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// MIME type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Size in bytes, as the decimal string Drive sends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Direct download link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_content_link: Option<String>,
    /// Every other requested field.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DriveFile {
    /// Whether this record is a folder.
    pub fn is_folder(&self) -> bool {
        self.mime_type.as_deref() == Some(FOLDER_MIME_TYPE)
    }

    /// Content type to serve, falling back to `application/octet-stream`.
    pub fn content_type(&self) -> &str {
        self.mime_type
            .as_deref()
            .unwrap_or("application/octet-stream")
    }

    /// Size in bytes, when present and numeric.
    pub fn size_bytes(&self) -> Option<u64> {
        self.size.as_deref().and_then(|s| s.trim().parse().ok())
    }
}

/// One page of a `files.list` response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileList {
    /// Records on this page.
    #[serde(default)]
    pub files: Vec<DriveFile>,
    /// Continuation token for the next page.
    #[serde(default)]
    pub next_page_token: Option<String>,
}
