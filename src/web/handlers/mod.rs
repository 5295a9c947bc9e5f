//! API handlers for the Web API.

pub mod banner;
pub mod docs;
pub mod files;

use std::sync::Arc;

use axum::http::HeaderValue;

use crate::codec::IdCodec;
use crate::drive::StorageProvider;
use crate::listing::ListingSettings;
use crate::{IndexError, Result};

pub use banner::get_banner;
pub use docs::{openapi_json, ApiDoc};
pub use files::list_files;

/// Shared storage provider handle.
pub type SharedProvider = Arc<dyn StorageProvider>;

/// Application state shared by every handler.
///
/// Built once at start-up and never mutated.
pub struct AppState {
    /// Storage backend.
    pub provider: SharedProvider,
    /// Identifier codec.
    pub codec: IdCodec,
    /// Listing settings.
    pub settings: ListingSettings,
    /// Pre-parsed Cache-Control header for successful responses.
    pub cache_control: HeaderValue,
}

impl AppState {
    /// Create the application state.
    ///
    /// Fails when the configured Cache-Control value is not a valid header value.
    pub fn new(provider: SharedProvider, codec: IdCodec, settings: ListingSettings) -> Result<Self> {
        let cache_control = HeaderValue::from_str(&settings.cache_control).map_err(|e| {
            IndexError::Config(format!("invalid files.cache_control: {e}"))
        })?;

        Ok(Self {
            provider,
            codec,
            settings,
            cache_control,
        })
    }
}
