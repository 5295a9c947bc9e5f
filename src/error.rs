//! Error types for Drive Index.

use thiserror::Error;

use crate::codec::CodecError;
use crate::drive::ProviderError;

/// Common error type for Drive Index.
#[derive(Error, Debug)]
pub enum IndexError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    ///
    /// Raised when the configuration cannot be parsed or is missing
    /// values the server needs to start.
    #[error("configuration error: {0}")]
    Config(String),

    /// Validation error for configuration values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Identifier codec error.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Storage provider error.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Result type alias for Drive Index operations.
pub type Result<T> = std::result::Result<T, IndexError>;
