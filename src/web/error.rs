//! API error handling.

use std::time::Instant;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::listing::ListingError;

use super::dto::ErrorResponse;

/// A failed request, rendered as the JSON error envelope.
#[derive(Debug)]
pub struct ApiError {
    error: ListingError,
    started: Instant,
}

impl ApiError {
    /// Wrap an error raised while handling a request that began at `started`.
    pub fn new(error: ListingError, started: Instant) -> Self {
        Self { error, started }
    }

    /// The underlying error.
    pub fn error(&self) -> &ListingError {
        &self.error
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let normalized = self.error.normalize();
        if normalized.code >= 500 {
            tracing::error!(code = normalized.code, error = %self.error, "Request failed");
        } else {
            tracing::warn!(code = normalized.code, reason = %normalized.reason, "Request rejected");
        }

        let status =
            StatusCode::from_u16(normalized.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse::new(normalized, self.started);
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ApiError {}
