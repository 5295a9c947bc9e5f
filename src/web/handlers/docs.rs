//! OpenAPI document.

use axum::Json;
use utoipa::OpenApi;

use crate::web::dto::{ErrorDetail, ErrorResponse};

/// OpenAPI description of the public endpoints.
#[derive(OpenApi)]
#[openapi(
    paths(super::files::list_files, super::banner::get_banner),
    components(schemas(ErrorResponse, ErrorDetail)),
    tags((name = "files", description = "Drive folder listing"))
)]
pub struct ApiDoc;

/// GET /api-docs/openapi.json - The OpenAPI document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
