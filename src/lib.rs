//! Drive Index - a read-only HTTP index over a Google Drive folder.
//!
//! Lists one folder page by page, hides raw Drive identifiers behind an
//! authenticated codec, and redirects or proxies the folder's banner image.

pub mod codec;
pub mod config;
pub mod datetime;
pub mod drive;
pub mod error;
pub mod listing;
pub mod logging;
pub mod web;

pub use codec::{CodecError, IdCodec};
pub use config::Config;
pub use drive::{DriveClient, DriveFile, FileList, ListingQuery, ProviderError, StorageProvider};
pub use error::{IndexError, Result};
pub use listing::{
    list_folder, ListingError, ListingOutcome, ListingPage, ListingParams, ListingSettings,
    NormalizedError,
};
pub use web::{build_app, AppState, WebServer};
