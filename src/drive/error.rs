//! Storage provider error types.

use serde::Deserialize;
use thiserror::Error;

/// One entry of the `errors` array in a Google API error body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorItem {
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Machine-readable reason, e.g. `notFound` or `rateLimitExceeded`.
    #[serde(default)]
    pub reason: Option<String>,
    /// Error domain.
    #[serde(default)]
    pub domain: Option<String>,
}

/// Errors surfaced by a storage provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider answered with an error status.
    #[error("provider returned {code}: {message}")]
    Api {
        /// Status code the provider reported.
        code: u16,
        /// Top-level message.
        message: String,
        /// Structured error details.
        errors: Vec<ErrorItem>,
    },

    /// The request never produced a response (connect failure, timeout).
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("invalid response: {0}")]
    Decode(String),

    /// A downloaded body exceeded the caller's limit.
    #[error("file exceeds {limit} bytes")]
    TooLarge {
        /// Limit in bytes.
        limit: u64,
    },
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorItem>,
}

impl ProviderError {
    /// Build an [`ProviderError::Api`] from a failed response.
    ///
    /// Google error envelopes are parsed into their code, message and
    /// details. Any other body is kept verbatim as the message.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => ProviderError::Api {
                code: envelope.error.code.unwrap_or(status),
                message: envelope.error.message.unwrap_or_default(),
                errors: envelope.error.errors,
            },
            Err(_) => ProviderError::Api {
                code: status,
                message: body.trim().to_string(),
                errors: Vec::new(),
            },
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ProviderError::Decode(e.to_string())
        } else {
            ProviderError::Transport(e.to_string())
        }
    }
}
