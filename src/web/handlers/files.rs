//! Files listing handler.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::listing::{list_folder, ListingError, ListingOutcome, ListingParams};
use crate::web::dto::{ErrorResponse, ListingResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// GET /api/files - List one page of the root folder.
#[utoipa::path(
    get,
    path = "/api/files",
    tag = "files",
    params(
        ("pageToken" = Option<String>, Query, description = "Continuation token from a previous page"),
        ("banner" = Option<String>, Query, description = "\"1\" redirects to the folder banner")
    ),
    responses(
        (status = 200, description = "Folders and files of the requested page"),
        (status = 302, description = "Redirect to the banner image"),
        (status = 404, description = "Banner requested but not found", body = ErrorResponse),
        (status = 500, description = "Provider or internal failure", body = ErrorResponse)
    )
)]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListingParams>, QueryRejection>,
) -> Response {
    let started = Instant::now();

    match serve_listing(&state, params, started).await {
        Ok(response) => response,
        Err(err) => ApiError::new(err, started).into_response(),
    }
}

async fn serve_listing(
    state: &AppState,
    params: Result<Query<ListingParams>, QueryRejection>,
    started: Instant,
) -> Result<Response, ListingError> {
    let Query(params) = params.map_err(|e| ListingError::BadRequest(e.body_text()))?;

    let outcome = list_folder(
        state.provider.as_ref(),
        &state.codec,
        &state.settings,
        &params,
    )
    .await?;

    match outcome {
        ListingOutcome::Page(page) => {
            let body = ListingResponse::new(page, started);
            Ok((
                [(header::CACHE_CONTROL, state.cache_control.clone())],
                Json(body),
            )
                .into_response())
        }
        ListingOutcome::Redirect(location) => found(&location),
    }
}

/// 302 Found to `location`.
pub(crate) fn found(location: &str) -> Result<Response, ListingError> {
    let location = HeaderValue::from_str(location).map_err(|_| ListingError::Internal {
        message: Some("Invalid redirect location.".to_string()),
        cause: None,
    })?;
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
