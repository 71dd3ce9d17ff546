// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token issuance and verification.
//!
//! Tokens are compact HS256 JWTs:
//!
//! ```text
//! base64url(header) . base64url(payload) . base64url(HMAC-SHA256)
//! ```
//!
//! with payload `{"sub": ..., "auth": "USER" | "ADMIN", "iat": ..., "exp": ...}`
//! and a fixed lifetime of one hour. Issued tokens carry the `Bearer ` prefix
//! so they can be placed in the `Authorization` header as-is; [`TokenCodec::decode`]
//! expects the bare token.

use base64ct::{Base64UrlUnpadded, Encoding};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{signing_key::SigningKey, Role};

/// Scheme label for the credential header, including the single space.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Token lifetime in seconds.
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

/// HMAC-SHA256 tag length.
const SIGNATURE_BYTES: usize = 32;

/// Claims carried inside a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (username)
    pub sub: String,
    /// Role at issuance time. Informational only; authorization uses the
    /// live user record.
    pub auth: Role,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiration (Unix seconds)
    pub exp: i64,
}

/// Why a token failed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is empty")]
    EmptyOrAbsent,
    #[error("token is malformed")]
    MalformedStructure,
    #[error("token signature does not match")]
    SignatureMismatch,
    #[error("token has expired")]
    Expired,
    #[error("token algorithm is not supported")]
    UnsupportedAlgorithm,
}

/// Why a token could not be issued.
#[derive(Debug, Error)]
pub enum IssueError {
    #[error("cannot issue a token for an empty subject")]
    EmptySubject,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// Signs and verifies tokens with the process-wide [`SigningKey`].
#[derive(Debug, Clone)]
pub struct TokenCodec {
    key: SigningKey,
}

impl TokenCodec {
    pub fn new(key: SigningKey) -> Self {
        Self { key }
    }

    /// Issue a token valid from now for [`TOKEN_TTL_SECS`].
    pub fn encode(&self, subject: &str, role: Role) -> Result<String, IssueError> {
        self.encode_at(subject, role, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn encode_at(
        &self,
        subject: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<String, IssueError> {
        if subject.is_empty() {
            return Err(IssueError::EmptySubject);
        }
        let iat = now.timestamp();
        let claims = TokenClaims {
            sub: subject.to_string(),
            auth: role,
            iat,
            exp: iat + TOKEN_TTL_SECS,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            self.key.encoding_key(),
        )
        .map_err(|e| IssueError::Signing(e.to_string()))?;
        Ok(format!("{BEARER_PREFIX}{token}"))
    }

    /// Verify a bare token (no scheme prefix) and return its claims.
    ///
    /// Never panics; every failure is reported as a [`TokenError`].
    pub fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        if token.trim().is_empty() {
            return Err(TokenError::EmptyOrAbsent);
        }

        let mut parts = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::MalformedStructure);
        };

        let header: RawHeader = decode_segment(header)?;
        if header.alg != "HS256" {
            return Err(TokenError::UnsupportedAlgorithm);
        }
        let _: serde_json::Map<String, serde_json::Value> = decode_segment(payload)?;

        match Base64UrlUnpadded::decode_vec(signature) {
            Ok(tag) if tag.len() == SIGNATURE_BYTES => {}
            _ => return Err(TokenError::SignatureMismatch),
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<TokenClaims>(token, self.key.decoding_key(), &validation).map_err(
            |e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::SignatureMismatch,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    TokenError::UnsupportedAlgorithm
                }
                _ => TokenError::MalformedStructure,
            },
        )?;

        if data.claims.sub.is_empty() {
            return Err(TokenError::MalformedStructure);
        }
        tracing::debug!(sub = %data.claims.sub, "token verified");
        Ok(data.claims)
    }
}

fn decode_segment<T: serde::de::DeserializeOwned>(segment: &str) -> Result<T, TokenError> {
    let bytes =
        Base64UrlUnpadded::decode_vec(segment).map_err(|_| TokenError::MalformedStructure)?;
    serde_json::from_slice(&bytes).map_err(|_| TokenError::MalformedStructure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use chrono::Duration;

    fn codec() -> TokenCodec {
        TokenCodec::new(SigningKey::from_bytes(&[7u8; 32]).unwrap())
    }

    fn bare(token: &str) -> &str {
        token.strip_prefix(BEARER_PREFIX).expect("issued with prefix")
    }

    fn forge(header: &str, payload: &str, signature: &str) -> String {
        format!(
            "{}.{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(payload),
            signature
        )
    }

    #[test]
    fn issued_token_round_trips() {
        let codec = codec();
        for (subject, role) in [("alice", Role::User), ("root", Role::Admin)] {
            let token = codec.encode(subject, role).unwrap();
            let claims = codec.decode(bare(&token)).unwrap();
            assert_eq!(claims.sub, subject);
            assert_eq!(claims.auth, role);
            assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
        }
    }

    #[test]
    fn issued_token_has_bearer_prefix_and_three_parts() {
        let token = codec().encode("alice", Role::User).unwrap();
        assert!(token.starts_with("Bearer "));
        assert_eq!(bare(&token).split('.').count(), 3);
    }

    #[test]
    fn encode_at_is_deterministic() {
        let codec = codec();
        let now = Utc::now();
        assert_eq!(
            codec.encode_at("alice", Role::User, now).unwrap(),
            codec.encode_at("alice", Role::User, now).unwrap()
        );
    }

    #[test]
    fn encode_refuses_empty_subject() {
        assert!(matches!(
            codec().encode("", Role::User),
            Err(IssueError::EmptySubject)
        ));
    }

    #[test]
    fn payload_uses_auth_claim_for_role() {
        let token = codec().encode("root", Role::Admin).unwrap();
        let payload = bare(&token).split('.').nth(1).unwrap();
        let json: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).unwrap()).unwrap();
        assert_eq!(json["auth"], "ADMIN");
        assert_eq!(json["sub"], "root");
    }

    #[test]
    fn altered_signature_is_a_mismatch() {
        let codec = codec();
        let token = codec.encode("alice", Role::User).unwrap();
        let token = bare(&token);
        let sig_start = token.rfind('.').unwrap() + 1;

        for offset in [0, 10, 20, 30, 41] {
            let mut bytes = token.as_bytes().to_vec();
            let idx = sig_start + offset;
            bytes[idx] = if bytes[idx] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();
            assert_eq!(
                codec.decode(&tampered),
                Err(TokenError::SignatureMismatch),
                "offset {offset}"
            );
        }
    }

    #[test]
    fn truncated_signature_is_a_mismatch() {
        let codec = codec();
        let token = codec.encode("alice", Role::User).unwrap();
        let token = bare(&token);
        assert_eq!(
            codec.decode(&token[..token.len() - 4]),
            Err(TokenError::SignatureMismatch)
        );
    }

    #[test]
    fn token_signed_with_other_key_is_a_mismatch() {
        let other = TokenCodec::new(SigningKey::from_bytes(&[9u8; 32]).unwrap());
        let token = other.encode("alice", Role::User).unwrap();
        assert_eq!(
            codec().decode(bare(&token)),
            Err(TokenError::SignatureMismatch)
        );
    }

    #[test]
    fn swapped_payload_is_a_mismatch() {
        let codec = codec();
        let alice = codec.encode("alice", Role::User).unwrap();
        let root = codec.encode("root", Role::Admin).unwrap();
        let alice: Vec<&str> = bare(&alice).split('.').collect();
        let root: Vec<&str> = bare(&root).split('.').collect();
        let spliced = format!("{}.{}.{}", alice[0], root[1], alice[2]);
        assert_eq!(codec.decode(&spliced), Err(TokenError::SignatureMismatch));
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let codec = codec();
        let issued = Utc::now() - Duration::seconds(TOKEN_TTL_SECS + 5);
        let token = codec.encode_at("alice", Role::User, issued).unwrap();
        assert_eq!(codec.decode(bare(&token)), Err(TokenError::Expired));
    }

    #[test]
    fn token_issued_just_inside_lifetime_is_valid() {
        let codec = codec();
        let issued = Utc::now() - Duration::seconds(TOKEN_TTL_SECS - 30);
        let token = codec.encode_at("alice", Role::User, issued).unwrap();
        assert!(codec.decode(bare(&token)).is_ok());
    }

    #[test]
    fn blank_token_is_empty() {
        assert_eq!(codec().decode(""), Err(TokenError::EmptyOrAbsent));
        assert_eq!(codec().decode("  "), Err(TokenError::EmptyOrAbsent));
    }

    #[test]
    fn wrong_part_count_is_malformed() {
        let codec = codec();
        assert_eq!(codec.decode("abc"), Err(TokenError::MalformedStructure));
        assert_eq!(codec.decode("a.b"), Err(TokenError::MalformedStructure));
        assert_eq!(codec.decode("a.b.c.d"), Err(TokenError::MalformedStructure));
    }

    #[test]
    fn undecodable_segments_are_malformed() {
        let codec = codec();
        assert_eq!(
            codec.decode("abc.def.ghi"),
            Err(TokenError::MalformedStructure)
        );
        let token = forge(r#"{"alg":"HS256","typ":"JWT"}"#, "not json", "sig");
        assert_eq!(codec.decode(&token), Err(TokenError::MalformedStructure));
    }

    #[test]
    fn foreign_algorithm_is_unsupported() {
        let codec = codec();
        let none = forge(
            r#"{"alg":"none","typ":"JWT"}"#,
            r#"{"sub":"alice","auth":"USER","iat":0,"exp":9999999999}"#,
            "",
        );
        assert_eq!(codec.decode(&none), Err(TokenError::UnsupportedAlgorithm));

        let key = jsonwebtoken::EncodingKey::from_secret(&[7u8; 32]);
        let claims = TokenClaims {
            sub: "alice".into(),
            auth: Role::User,
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + TOKEN_TTL_SECS,
        };
        let hs512 = encode(&Header::new(Algorithm::HS512), &claims, &key).unwrap();
        assert_eq!(codec.decode(&hs512), Err(TokenError::UnsupportedAlgorithm));
    }

    #[test]
    fn unknown_role_is_malformed() {
        let key = jsonwebtoken::EncodingKey::from_secret(&[7u8; 32]);
        let now = Utc::now().timestamp();
        let claims = serde_json::json!({
            "sub": "alice",
            "auth": "SUPERUSER",
            "iat": now,
            "exp": now + TOKEN_TTL_SECS,
        });
        let token = encode(&Header::new(Algorithm::HS256), &claims, &key).unwrap();
        assert_eq!(codec().decode(&token), Err(TokenError::MalformedStructure));
    }

    #[test]
    fn empty_subject_is_malformed() {
        let key = jsonwebtoken::EncodingKey::from_secret(&[7u8; 32]);
        let now = Utc::now().timestamp();
        let claims = serde_json::json!({
            "sub": "",
            "auth": "USER",
            "iat": now,
            "exp": now + TOKEN_TTL_SECS,
        });
        let token = encode(&Header::new(Algorithm::HS256), &claims, &key).unwrap();
        assert_eq!(codec().decode(&token), Err(TokenError::MalformedStructure));
    }
}
