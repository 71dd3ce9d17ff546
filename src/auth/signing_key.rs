// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HS256 signing key derived from the configured secret.
//!
//! The key is built once at startup from `JWT_SECRET_KEY` (standard base64)
//! and is read-only for the rest of the process. There is no rotation.

use base64ct::{Base64, Encoding};
use jsonwebtoken::{DecodingKey, EncodingKey};
use thiserror::Error;

/// Minimum key length for HS256 (256 bits).
pub const MIN_KEY_BYTES: usize = 32;

/// Errors raised while building the signing key.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("signing secret is empty")]
    Empty,
    #[error("signing secret is not valid base64")]
    InvalidEncoding,
    #[error("signing secret decodes to {len} bytes, HS256 requires at least 32")]
    TooShort { len: usize },
}

/// Symmetric HMAC key material for the token codec.
#[derive(Clone)]
pub struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
    len: usize,
}

impl SigningKey {
    /// Decode a base64 secret into a signing key.
    ///
    /// # Errors
    /// Fails on blank input, invalid base64, or fewer than 32 decoded bytes.
    pub fn from_base64(secret: &str) -> Result<Self, KeyError> {
        let secret = secret.trim();
        if secret.is_empty() {
            return Err(KeyError::Empty);
        }
        let bytes = Base64::decode_vec(secret).map_err(|_| KeyError::InvalidEncoding)?;
        Self::from_bytes(&bytes)
    }

    /// Build a signing key from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.is_empty() {
            return Err(KeyError::Empty);
        }
        if bytes.len() < MIN_KEY_BYTES {
            return Err(KeyError::TooShort { len: bytes.len() });
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            len: bytes.len(),
        })
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_256_bit_secret() {
        let secret = Base64::encode_string(&[42u8; 32]);
        let key = SigningKey::from_base64(&secret).expect("32 bytes is enough");
        assert_eq!(key.len, 32);
    }

    #[test]
    fn rejects_short_secret() {
        let secret = Base64::encode_string(&[1u8; 31]);
        assert_eq!(
            SigningKey::from_base64(&secret).unwrap_err(),
            KeyError::TooShort { len: 31 }
        );
    }

    #[test]
    fn rejects_blank_secret() {
        assert_eq!(SigningKey::from_base64("").unwrap_err(), KeyError::Empty);
        assert_eq!(SigningKey::from_base64("   ").unwrap_err(), KeyError::Empty);
    }

    #[test]
    fn rejects_invalid_base64() {
        assert_eq!(
            SigningKey::from_base64("not*base64!").unwrap_err(),
            KeyError::InvalidEncoding
        );
    }

    #[test]
    fn debug_does_not_print_key_material() {
        let key = SigningKey::from_bytes(&[0xAB; 32]).unwrap();
        let rendered = format!("{key:?}");
        assert!(rendered.contains("len: 32"));
        assert!(!rendered.contains("171"));
    }
}
