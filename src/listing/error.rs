//! Listing errors and their normalization into the wire envelope.

use thiserror::Error;

use crate::codec::CodecError;
use crate::drive::ProviderError;

/// Fallback message when no error carries one.
pub const UNKNOWN_MESSAGE: &str = "Unknown error";

/// Fallback reason when no error carries one.
pub const INTERNAL_REASON: &str = "internalError";

/// Errors produced while serving a listing or banner request.
#[derive(Debug, Error)]
pub enum ListingError {
    /// A requested special file does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The request itself is invalid.
    #[error("{0}")]
    BadRequest(String),

    /// The storage provider failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// An identifier could not be encoded or decoded.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Anything else.
    #[error("{}", message.as_deref().unwrap_or(UNKNOWN_MESSAGE))]
    Internal {
        /// Error message, if known.
        message: Option<String>,
        /// Short cause, used as the reason.
        cause: Option<String>,
    },
}

/// Code, message and reason reported to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedError {
    /// HTTP status code, always in 100..=999.
    pub code: u16,
    /// Human-readable message.
    pub message: String,
    /// Machine-readable reason.
    pub reason: String,
}

impl ListingError {
    /// Reduce this error to a code, message and reason.
    ///
    /// Precedence, first non-empty value wins:
    ///
    /// - code: provider-reported code, then the error's own code (404 for
    ///   `NotFound`, 400 for `BadRequest`), then 500
    /// - message: first structured provider error message, then the
    ///   top-level message, then `"Unknown error"`
    /// - reason: first structured provider error reason, then the error's
    ///   cause, then `"internalError"`
    ///
    /// Codes outside the valid HTTP range become 500, so the response
    /// status can always mirror `code`.
    pub fn normalize(&self) -> NormalizedError {
        let (code, message, reason): (Option<u16>, Option<&str>, Option<&str>) = match self {
            ListingError::NotFound(message) => {
                (Some(404), Some(message.as_str()), Some("notFound"))
            }
            ListingError::BadRequest(message) => {
                (Some(400), Some(message.as_str()), Some("badRequest"))
            }
            ListingError::Provider(ProviderError::Api {
                code,
                message,
                errors,
            }) => {
                let first = errors.first();
                let detail_message = first.and_then(|e| non_empty(e.message.as_deref()));
                let detail_reason = first.and_then(|e| non_empty(e.reason.as_deref()));
                (
                    Some(*code),
                    detail_message.or(non_empty(Some(message.as_str()))),
                    detail_reason,
                )
            }
            ListingError::Provider(ProviderError::Transport(message))
            | ListingError::Provider(ProviderError::Decode(message)) => {
                (None, Some(message.as_str()), None)
            }
            ListingError::Provider(ProviderError::TooLarge { .. }) => {
                (Some(413), None, Some("fileTooLarge"))
            }
            ListingError::Codec(_) => (None, None, None),
            ListingError::Internal { message, cause } => {
                (None, message.as_deref(), cause.as_deref())
            }
        };

        let message = match self {
            ListingError::Codec(e) => e.to_string(),
            ListingError::Provider(e @ ProviderError::TooLarge { .. }) => e.to_string(),
            _ => non_empty(message).unwrap_or(UNKNOWN_MESSAGE).to_string(),
        };

        NormalizedError {
            code: code.filter(|c| (100..=999).contains(c)).unwrap_or(500),
            message,
            reason: non_empty(reason).unwrap_or(INTERNAL_REASON).to_string(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
