//! Codec error types.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// Errors that can occur while encoding or decoding identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The codec secret is empty.
    #[error("codec secret must not be empty")]
    EmptySecret,
    /// An empty identifier was given to `encode`.
    #[error("cannot encode an empty identifier")]
    EmptyInput,
    /// Key derivation failed.
    #[error("key derivation failed")]
    KeyDerivation,
    /// The cipher refused to seal the identifier.
    #[error("failed to seal identifier")]
    Seal,
    /// The token is not valid URL-safe base64 or is too short.
    #[error("malformed token")]
    Malformed,
    /// Authentication failed: the token was not produced with this secret.
    #[error("token authentication failed")]
    Tampered,
    /// Decrypted data does not end with valid padding.
    #[error("invalid padding")]
    InvalidPadding,
    /// Decrypted identifier is not valid UTF-8.
    #[error("decoded identifier is not valid UTF-8")]
    InvalidUtf8,
}
