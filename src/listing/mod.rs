//! Folder listing for the files endpoint.
//!
//! [`list_folder`] turns one request into either a page of entries or a
//! redirect to the folder's banner. It never touches HTTP types, so the
//! whole flow is testable with an in-memory [`StorageProvider`].

pub mod classify;
mod error;

use serde::{Deserialize, Serialize};

use crate::codec::IdCodec;
use crate::config::Config;
use crate::drive::{DriveFile, ListingQuery, StorageProvider};

pub use classify::{find_special_files, is_hidden, partition, SpecialFiles};
pub use error::{ListingError, NormalizedError, INTERNAL_REASON, UNKNOWN_MESSAGE};

/// Settings the listing flow reads, taken from the configuration once at start-up.
#[derive(Debug, Clone)]
pub struct ListingSettings {
    /// Folder whose children are listed.
    pub root_folder: String,
    /// Per-record field projection.
    pub fields: String,
    /// Ordering.
    pub order_by: String,
    /// Records per page.
    pub page_size: u32,
    /// Largest banner, in bytes, that is proxied instead of linked.
    pub max_file_size: u64,
    /// Exact readme name.
    pub readme: String,
    /// Banner name prefix.
    pub banner_prefix: String,
    /// Name prefixes of hidden files.
    pub hidden_prefixes: Vec<String>,
    /// Cache-Control value for successful responses.
    pub cache_control: String,
    /// Path prefix used when building internal redirects.
    pub base_path: String,
}

impl ListingSettings {
    /// Build settings from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            root_folder: config.drive.root_folder.clone(),
            fields: config.files.fields.clone(),
            order_by: config.files.order_by.clone(),
            page_size: config.files.items_per_page,
            max_file_size: config.files.max_file_size,
            readme: config.files.readme.clone(),
            banner_prefix: config.files.banner.clone(),
            hidden_prefixes: config.files.hidden_files.clone(),
            cache_control: config.files.cache_control.clone(),
            base_path: config.server.base_path.trim_end_matches('/').to_string(),
        }
    }

    /// The provider query for one page of the root folder.
    pub fn query(&self, page_token: Option<&str>) -> ListingQuery {
        ListingQuery::for_folder(self.root_folder.as_str())
            .with_fields(self.fields.as_str())
            .with_order_by(self.order_by.as_str())
            .with_page_size(self.page_size)
            .with_page_token(page_token)
    }

    /// URL of the internal banner endpoint for an encoded id.
    pub fn banner_proxy_url(&self, token: &str) -> String {
        format!("{}/api/banner?id={}", self.base_path, token)
    }
}

/// Query parameters of the files endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingParams {
    /// Continuation token from a previous page.
    #[serde(default)]
    pub page_token: Option<String>,
    /// `"1"` asks for a redirect to the banner instead of a listing.
    #[serde(default)]
    pub banner: Option<String>,
}

impl ListingParams {
    /// Whether banner-redirect mode was requested.
    pub fn banner_mode(&self) -> bool {
        self.banner.as_deref() == Some("1")
    }
}

/// One page of folder contents, ids already encoded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPage {
    /// Folder records.
    pub folders: Vec<DriveFile>,
    /// Visible file records.
    pub files: Vec<DriveFile>,
    /// Whether the page contains the readme.
    pub is_readme_exists: bool,
    /// Whether the page contains a banner image.
    pub is_banner_exists: bool,
    /// Token for the next page, if there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Result of a listing request.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingOutcome {
    /// A page of entries.
    Page(ListingPage),
    /// Redirect the client to this location.
    Redirect(String),
}

/// Serve one listing request.
pub async fn list_folder(
    provider: &dyn StorageProvider,
    codec: &IdCodec,
    settings: &ListingSettings,
    params: &ListingParams,
) -> Result<ListingOutcome, ListingError> {
    let query = settings.query(params.page_token.as_deref());
    let page = provider.list_folder_contents(&query).await?;

    let special = find_special_files(&page.files, &settings.readme, &settings.banner_prefix);
    let is_readme_exists = special.readme.is_some();
    let is_banner_exists = special.banner.is_some();

    if params.banner_mode() {
        let banner = special
            .banner
            .ok_or_else(|| ListingError::NotFound("Banner not found.".to_string()))?;
        return banner_redirect(banner, codec, settings).map(ListingOutcome::Redirect);
    }

    let (folders, files) = partition(page.files, &settings.hidden_prefixes);
    let folders = folders
        .into_iter()
        .map(|folder| encode_folder(folder, codec))
        .collect::<Result<Vec<_>, _>>()?;
    let files = files
        .into_iter()
        .map(|file| encode_file(file, codec))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        folders = folders.len(),
        files = files.len(),
        has_next_page = page.next_page_token.is_some(),
        "Listed folder contents"
    );

    Ok(ListingOutcome::Page(ListingPage {
        folders,
        files,
        is_readme_exists,
        is_banner_exists,
        next_page_token: page.next_page_token.filter(|t| !t.is_empty()),
    }))
}

/// Where to send a banner request.
///
/// Oversized banners go straight to Drive's content link. Everything else
/// goes through the internal banner endpoint under an encoded id.
fn banner_redirect(
    banner: &DriveFile,
    codec: &IdCodec,
    settings: &ListingSettings,
) -> Result<String, ListingError> {
    let oversized = banner
        .size_bytes()
        .is_some_and(|size| size > settings.max_file_size);
    if oversized {
        if let Some(link) = banner.web_content_link.as_deref().filter(|l| !l.is_empty()) {
            return Ok(link.to_string());
        }
        tracing::warn!("Oversized banner has no content link, proxying instead");
    }

    let id = banner.id.as_deref().unwrap_or_default();
    let token = codec.encode(id)?;
    Ok(settings.banner_proxy_url(&token))
}

fn encode_folder(mut folder: DriveFile, codec: &IdCodec) -> Result<DriveFile, ListingError> {
    folder.id = encode_optional(folder.id, codec)?;
    Ok(folder)
}

fn encode_file(mut file: DriveFile, codec: &IdCodec) -> Result<DriveFile, ListingError> {
    file.id = encode_optional(file.id, codec)?;
    file.web_content_link = encode_optional(file.web_content_link, codec)?;
    Ok(file)
}

/// Encode a field that may be absent; absent or empty values are dropped.
fn encode_optional(value: Option<String>, codec: &IdCodec) -> Result<Option<String>, ListingError> {
    match value.filter(|v| !v.is_empty()) {
        Some(plain) => Ok(Some(codec.encode(&plain)?)),
        None => Ok(None),
    }
}
