//! Reversible obfuscation of storage identifiers.
//!
//! Raw Drive object ids and content links never reach the client. They are
//! sealed into opaque, URL-safe tokens with [`IdCodec::encode`] and opened
//! again with [`IdCodec::decode`] when the client hands a token back.
//!
//! # Token Format
//!
//! `base64url(nonce (24 bytes) || ciphertext || tag (16 bytes))`, unpadded.
//!
//! - The plaintext is padded to a multiple of 16 bytes (ISO/IEC 7816-4), so
//!   a token only reveals which length bucket an identifier falls into.
//! - The nonce is an HMAC-SHA256 of the padded plaintext, which makes the
//!   encryption deterministic: the same id always maps to the same token for
//!   a given secret.
//! - Sealing uses XChaCha20-Poly1305, so tokens minted with another secret
//!   or modified in transit are rejected.

mod error;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{Key, XChaCha20Poly1305, XNonce};
use hkdf::Hkdf;
use hmac::{Hmac, Mac};
use sha2::Sha256;

pub use error::{CodecError, CodecResult};

/// Size of the XChaCha20-Poly1305 nonce in bytes.
pub const NONCE_SIZE: usize = 24;

/// Size of the Poly1305 authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// Padding block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Smallest decoded token: nonce, one padded block and the tag.
const MIN_TOKEN_SIZE: usize = NONCE_SIZE + BLOCK_SIZE + TAG_SIZE;

const KDF_SALT: &[u8] = b"driveindex/id-codec/v1";
const CIPHER_KEY_INFO: &[u8] = b"cipher-key";
const NONCE_KEY_INFO: &[u8] = b"nonce-key";

type HmacSha256 = Hmac<Sha256>;

/// Deterministic, authenticated identifier codec.
#[derive(Clone)]
pub struct IdCodec {
    cipher_key: [u8; 32],
    nonce_key: [u8; 32],
}

impl IdCodec {
    /// Derive a codec from the configured secret.
    pub fn new(secret: &str) -> CodecResult<Self> {
        if secret.is_empty() {
            return Err(CodecError::EmptySecret);
        }

        let hk = Hkdf::<Sha256>::new(Some(KDF_SALT), secret.as_bytes());
        let mut cipher_key = [0u8; 32];
        let mut nonce_key = [0u8; 32];
        hk.expand(CIPHER_KEY_INFO, &mut cipher_key)
            .map_err(|_| CodecError::KeyDerivation)?;
        hk.expand(NONCE_KEY_INFO, &mut nonce_key)
            .map_err(|_| CodecError::KeyDerivation)?;

        Ok(Self {
            cipher_key,
            nonce_key,
        })
    }

    /// Seal a plain identifier into an opaque token.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EmptyInput`] for an empty identifier. Callers
    /// holding optional fields must check them before encoding.
    pub fn encode(&self, plain: &str) -> CodecResult<String> {
        if plain.is_empty() {
            return Err(CodecError::EmptyInput);
        }

        let padded = pad(plain.as_bytes());
        let nonce = self.synthetic_nonce(&padded)?;

        let cipher = XChaCha20Poly1305::new(Key::from_slice(&self.cipher_key));
        let sealed = cipher
            .encrypt(XNonce::from_slice(&nonce), padded.as_slice())
            .map_err(|_| CodecError::Seal)?;

        let mut raw = Vec::with_capacity(NONCE_SIZE + sealed.len());
        raw.extend_from_slice(&nonce);
        raw.extend_from_slice(&sealed);

        Ok(URL_SAFE_NO_PAD.encode(raw))
    }

    /// Open a token produced by [`IdCodec::encode`].
    pub fn decode(&self, token: &str) -> CodecResult<String> {
        let raw = URL_SAFE_NO_PAD
            .decode(token.as_bytes())
            .map_err(|_| CodecError::Malformed)?;
        if raw.len() < MIN_TOKEN_SIZE {
            return Err(CodecError::Malformed);
        }

        let (nonce, sealed) = raw.split_at(NONCE_SIZE);
        let cipher = XChaCha20Poly1305::new(Key::from_slice(&self.cipher_key));
        let padded = cipher
            .decrypt(XNonce::from_slice(nonce), sealed)
            .map_err(|_| CodecError::Tampered)?;

        let plain = unpad(&padded)?;
        String::from_utf8(plain.to_vec()).map_err(|_| CodecError::InvalidUtf8)
    }

    fn synthetic_nonce(&self, padded: &[u8]) -> CodecResult<[u8; NONCE_SIZE]> {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(&self.nonce_key)
            .map_err(|_| CodecError::KeyDerivation)?;
        mac.update(padded);
        let digest = mac.finalize().into_bytes();

        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(&digest[..NONCE_SIZE]);
        Ok(nonce)
    }
}

impl std::fmt::Debug for IdCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdCodec").finish_non_exhaustive()
    }
}

/// ISO/IEC 7816-4 padding: a 0x80 marker followed by zeros up to the block size.
fn pad(data: &[u8]) -> Vec<u8> {
    let padded_len = (data.len() / BLOCK_SIZE + 1) * BLOCK_SIZE;
    let mut out = Vec::with_capacity(padded_len);
    out.extend_from_slice(data);
    out.push(0x80);
    out.resize(padded_len, 0);
    out
}

fn unpad(data: &[u8]) -> CodecResult<&[u8]> {
    let marker = data
        .iter()
        .rposition(|&b| b != 0)
        .ok_or(CodecError::InvalidPadding)?;
    if data[marker] != 0x80 {
        return Err(CodecError::InvalidPadding);
    }
    Ok(&data[..marker])
}
