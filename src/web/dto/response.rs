//! Response DTOs for the Web API.

use std::time::Instant;

use serde::Serialize;
use utoipa::ToSchema;

use crate::datetime::{elapsed_ms, now_iso};
use crate::listing::{ListingPage, NormalizedError};

/// Successful listing response.
///
/// The page fields are inlined next to the envelope fields.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    /// Always `true`.
    pub success: bool,
    /// ISO-8601 time the response was produced.
    pub timestamp: String,
    /// Milliseconds spent handling the request.
    pub response_time: u64,
    /// Folders, files, special-file flags and the next page token.
    #[serde(flatten)]
    pub page: ListingPage,
}

impl ListingResponse {
    /// Wrap a page, measuring time since `started`.
    pub fn new(page: ListingPage, started: Instant) -> Self {
        Self {
            success: true,
            timestamp: now_iso(),
            response_time: elapsed_ms(started),
            page,
        }
    }
}

/// Error envelope returned on every failure.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// ISO-8601 time the response was produced.
    pub timestamp: String,
    /// Milliseconds spent handling the request.
    pub response_time: u64,
    /// HTTP status code, mirrored by the response status.
    pub code: u16,
    /// Error details.
    pub errors: ErrorDetail,
}

/// Message and reason of an error.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorDetail {
    /// Human-readable message.
    pub message: String,
    /// Machine-readable reason, e.g. `notFound`.
    pub reason: String,
}

impl ErrorResponse {
    /// Build the envelope for a normalized error, measuring time since `started`.
    pub fn new(error: NormalizedError, started: Instant) -> Self {
        Self {
            success: false,
            timestamp: now_iso(),
            response_time: elapsed_ms(started),
            code: error.code,
            errors: ErrorDetail {
                message: error.message,
                reason: error.reason,
            },
        }
    }
}
