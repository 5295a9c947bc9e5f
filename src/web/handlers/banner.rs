//! Banner proxy handler.
//!
//! Banner mode of the files endpoint redirects small banners here, so the
//! raw Drive id stays hidden and response headers stay under our control.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::drive::{DriveFile, ProviderError};
use crate::listing::classify::IMAGE_MIME_PREFIX;
use crate::listing::ListingError;
use crate::web::dto::ErrorResponse;
use crate::web::error::ApiError;
use crate::web::handlers::{files::found, AppState};

/// Query parameters for the banner endpoint.
#[derive(Debug, Deserialize)]
pub struct BannerQuery {
    /// Encoded file id.
    #[serde(default)]
    pub id: Option<String>,
}

/// GET /api/banner - Serve a banner image by encoded id.
#[utoipa::path(
    get,
    path = "/api/banner",
    tag = "files",
    params(
        ("id" = String, Query, description = "Encoded file id")
    ),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 302, description = "Image too large to proxy, redirect to its content link"),
        (status = 400, description = "Missing or invalid id", body = ErrorResponse),
        (status = 404, description = "File is not an image, or too large without a content link", body = ErrorResponse)
    )
)]
pub async fn get_banner(
    State(state): State<Arc<AppState>>,
    query: Result<Query<BannerQuery>, QueryRejection>,
) -> Response {
    let started = Instant::now();

    match serve_banner(&state, query).await {
        Ok(response) => response,
        Err(err) => ApiError::new(err, started).into_response(),
    }
}

async fn serve_banner(
    state: &AppState,
    query: Result<Query<BannerQuery>, QueryRejection>,
) -> Result<Response, ListingError> {
    let Query(query) = query.map_err(|e| ListingError::BadRequest(e.body_text()))?;
    let token = query
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ListingError::BadRequest("Missing id.".to_string()))?;

    let file_id = state.codec.decode(&token).map_err(|e| {
        tracing::debug!(error = %e, "Rejected banner token");
        ListingError::BadRequest("Invalid id.".to_string())
    })?;

    let metadata = state.provider.file_metadata(&file_id).await?;
    if !metadata.content_type().starts_with(IMAGE_MIME_PREFIX) {
        return Err(ListingError::NotFound("Banner not found.".to_string()));
    }

    let max_bytes = state.settings.max_file_size;
    if metadata.size_bytes().is_some_and(|size| size > max_bytes) {
        return oversized(&metadata);
    }

    let bytes = match state.provider.download_media(&file_id, max_bytes).await {
        Ok(bytes) => bytes,
        Err(ProviderError::TooLarge { .. }) => return oversized(&metadata),
        Err(e) => return Err(e.into()),
    };

    let content_type = HeaderValue::from_str(metadata.content_type()).map_err(|_| {
        ListingError::Internal {
            message: Some("Invalid content type.".to_string()),
            cause: None,
        }
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, state.cache_control.clone()),
        ],
        bytes,
    )
        .into_response())
}

/// Images above the size limit are never proxied: send the client to Drive's
/// own content link, or report the banner as missing when there is none.
fn oversized(metadata: &DriveFile) -> Result<Response, ListingError> {
    let link = metadata
        .web_content_link
        .as_deref()
        .filter(|link| !link.is_empty())
        .ok_or_else(|| ListingError::NotFound("Banner not found.".to_string()))?;
    tracing::debug!(size = ?metadata.size, "Banner too large to proxy, redirecting");
    found(link)
}
