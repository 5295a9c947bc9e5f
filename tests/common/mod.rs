//! Shared helpers for the Web API integration tests.
//!
//! [`FakeDrive`] is an in-memory [`StorageProvider`] that serves a fixed
//! page, records the last query it saw, and serves downloads from a map,
//! recording every media request.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use driveindex::drive::{DriveFile, FileList, ListingQuery, ProviderError, FOLDER_MIME_TYPE};
use driveindex::{build_app, AppState, Config, IdCodec, ListingSettings, StorageProvider};

/// Secret used by every test codec.
pub const TEST_SECRET: &str = "integration-test-secret";

/// Root folder id used by every test configuration.
pub const ROOT_FOLDER: &str = "root-folder-id";

/// In-memory storage provider.
#[derive(Default)]
pub struct FakeDrive {
    page: Mutex<Option<Result<FileList, ProviderError>>>,
    downloads: Mutex<HashMap<String, (DriveFile, Vec<u8>)>>,
    last_query: Mutex<Option<ListingQuery>>,
    media_requests: Mutex<Vec<String>>,
}

impl FakeDrive {
    /// A provider returning `files` as a single page.
    pub fn with_files(files: Vec<DriveFile>) -> Self {
        let drive = Self::default();
        drive.set_page(Ok(FileList {
            files,
            next_page_token: None,
        }));
        drive
    }

    /// A provider failing every listing with `error`.
    pub fn failing(error: ProviderError) -> Self {
        let drive = Self::default();
        drive.set_page(Err(error));
        drive
    }

    /// Replace the listing result.
    pub fn set_page(&self, page: Result<FileList, ProviderError>) {
        *self.page.lock().unwrap() = Some(page);
    }

    /// Make `id` downloadable; the metadata reports the real size.
    pub fn add_download(&self, id: &str, mime_type: &str, bytes: &[u8]) {
        let metadata = DriveFile {
            id: Some(id.to_string()),
            name: Some(format!("{id}.bin")),
            mime_type: Some(mime_type.to_string()),
            size: Some(bytes.len().to_string()),
            ..Default::default()
        };
        self.add_record(metadata, bytes);
    }

    /// Make a record downloadable with arbitrary metadata.
    pub fn add_record(&self, metadata: DriveFile, bytes: &[u8]) {
        let id = metadata.id.clone().unwrap_or_default();
        self.downloads
            .lock()
            .unwrap()
            .insert(id, (metadata, bytes.to_vec()));
    }

    /// Ids whose contents were requested, in order.
    pub fn media_requests(&self) -> Vec<String> {
        self.media_requests.lock().unwrap().clone()
    }

    /// The last listing query received.
    pub fn last_query(&self) -> Option<ListingQuery> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl StorageProvider for FakeDrive {
    async fn list_folder_contents(&self, query: &ListingQuery) -> Result<FileList, ProviderError> {
        *self.last_query.lock().unwrap() = Some(query.clone());
        self.page
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(FileList::default()))
    }

    async fn file_metadata(&self, file_id: &str) -> Result<DriveFile, ProviderError> {
        self.downloads
            .lock()
            .unwrap()
            .get(file_id)
            .map(|(metadata, _)| metadata.clone())
            .ok_or_else(|| not_found(file_id))
    }

    async fn download_media(&self, file_id: &str, max_bytes: u64) -> Result<Vec<u8>, ProviderError> {
        self.media_requests.lock().unwrap().push(file_id.to_string());
        let bytes = self
            .downloads
            .lock()
            .unwrap()
            .get(file_id)
            .map(|(_, bytes)| bytes.clone())
            .ok_or_else(|| not_found(file_id))?;
        if bytes.len() as u64 > max_bytes {
            return Err(ProviderError::TooLarge { limit: max_bytes });
        }
        Ok(bytes)
    }
}

fn not_found(file_id: &str) -> ProviderError {
    ProviderError::Api {
        code: 404,
        message: format!("File not found: {file_id}."),
        errors: vec![],
    }
}

/// Configuration used by the tests.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.codec.secret = TEST_SECRET.to_string();
    config.drive.root_folder = ROOT_FOLDER.to_string();
    config.drive.access_token = "test-token".to_string();
    config
}

/// The codec the test server uses.
pub fn test_codec() -> IdCodec {
    IdCodec::new(TEST_SECRET).unwrap()
}

/// Build a test server over `drive` with the given configuration.
pub fn create_test_server_with(drive: Arc<FakeDrive>, config: &Config) -> TestServer {
    let settings = ListingSettings::from_config(config);
    let state = AppState::new(drive, test_codec(), settings).unwrap();
    let router = build_app(Arc::new(state), &config.server.cors_origins);
    TestServer::new(router).unwrap()
}

/// Build a test server over `drive` with [`test_config`].
pub fn create_test_server(drive: Arc<FakeDrive>) -> TestServer {
    create_test_server_with(drive, &test_config())
}

/// A folder record.
pub fn folder(id: &str, name: &str) -> DriveFile {
    DriveFile {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        mime_type: Some(FOLDER_MIME_TYPE.to_string()),
        ..Default::default()
    }
}

/// A file record with a size and content link.
pub fn file(id: &str, name: &str, mime_type: &str, size: u64) -> DriveFile {
    DriveFile {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        mime_type: Some(mime_type.to_string()),
        size: Some(size.to_string()),
        web_content_link: Some(content_link(id)),
        ..Default::default()
    }
}

/// The content link [`file`] gives a record.
pub fn content_link(id: &str) -> String {
    format!("https://drive.example/download?id={id}")
}
