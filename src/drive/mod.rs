//! Storage provider adapter for Google Drive.
//!
//! The listing logic talks to Drive through the [`StorageProvider`] trait,
//! so tests can run it against an in-memory provider.

mod client;
mod error;
pub mod query;
pub mod types;

use async_trait::async_trait;

pub use client::DriveClient;
pub use error::{ErrorItem, ProviderError};
pub use query::{ListingQuery, Predicate};
pub use types::{DriveFile, FileList, FOLDER_MIME_TYPE};

/// Operations the web layer needs from the storage backend.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Fetch one page of a folder listing.
    ///
    /// The continuation token in the query is passed through as-is and the
    /// returned `next_page_token` is the provider's; pages are never merged.
    async fn list_folder_contents(&self, query: &ListingQuery) -> Result<FileList, ProviderError>;

    /// Fetch a single record's metadata (`id`, `name`, `mimeType`, `size`,
    /// `webContentLink`) without touching its contents.
    async fn file_metadata(&self, file_id: &str) -> Result<DriveFile, ProviderError>;

    /// Fetch a file's contents.
    ///
    /// Fails with [`ProviderError::TooLarge`] as soon as the body is known to
    /// exceed `max_bytes`, without buffering the rest of it.
    async fn download_media(&self, file_id: &str, max_bytes: u64)
        -> Result<Vec<u8>, ProviderError>;
}
