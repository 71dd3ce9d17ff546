// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::token::TokenError;

/// Authentication and authorization failure kinds.
///
/// This layer only classifies failures; [`IntoResponse`] turns them into a
/// 401 or 403 with a stable `error_code`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No bearer token on the request
    TokenAbsent,
    /// Token is malformed
    TokenMalformed,
    /// Token signature is invalid
    TokenSignatureInvalid,
    /// Token has expired
    TokenExpired,
    /// Token header declares an algorithm other than HS256
    TokenUnsupportedAlgorithm,
    /// Token subject does not match a stored user
    UserUnknown,
    /// Operation requires an authenticated caller
    NotAuthenticated,
    /// Caller is neither the owner nor an admin
    NotOwner,
    /// Internal error
    InternalError(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::TokenAbsent => "token_absent",
            AuthError::TokenMalformed => "token_malformed",
            AuthError::TokenSignatureInvalid => "token_signature_invalid",
            AuthError::TokenExpired => "token_expired",
            AuthError::TokenUnsupportedAlgorithm => "token_unsupported_algorithm",
            AuthError::UserUnknown => "user_unknown",
            AuthError::NotAuthenticated => "not_authenticated",
            AuthError::NotOwner => "not_owner",
            AuthError::InternalError(_) => "internal_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::TokenAbsent
            | AuthError::TokenMalformed
            | AuthError::TokenSignatureInvalid
            | AuthError::TokenExpired
            | AuthError::TokenUnsupportedAlgorithm
            | AuthError::UserUnknown
            | AuthError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            AuthError::NotOwner => StatusCode::FORBIDDEN,
            AuthError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::EmptyOrAbsent => AuthError::TokenAbsent,
            TokenError::MalformedStructure => AuthError::TokenMalformed,
            TokenError::SignatureMismatch => AuthError::TokenSignatureInvalid,
            TokenError::Expired => AuthError::TokenExpired,
            TokenError::UnsupportedAlgorithm => AuthError::TokenUnsupportedAlgorithm,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::TokenAbsent => {
                write!(f, "Authorization header is required (expected 'Bearer <token>')")
            }
            AuthError::TokenMalformed => write!(f, "Token is malformed"),
            AuthError::TokenSignatureInvalid => write!(f, "Token signature is invalid"),
            AuthError::TokenExpired => write!(f, "Token has expired"),
            AuthError::TokenUnsupportedAlgorithm => write!(f, "Token algorithm is not supported"),
            AuthError::UserUnknown => write!(f, "Token subject is not a known user"),
            AuthError::NotAuthenticated => write!(f, "Authentication is required"),
            AuthError::NotOwner => write!(f, "Only the author or an administrator may do this"),
            AuthError::InternalError(msg) => write!(f, "Internal authentication error: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn missing_token_returns_401() {
        let response = AuthError::TokenAbsent.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error_code"], "token_absent");
    }

    #[tokio::test]
    async fn not_owner_returns_403() {
        let response = AuthError::NotOwner.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn token_errors_keep_their_kind() {
        assert_eq!(
            AuthError::from(TokenError::SignatureMismatch),
            AuthError::TokenSignatureInvalid
        );
        assert_eq!(AuthError::from(TokenError::Expired), AuthError::TokenExpired);
        assert_eq!(
            AuthError::from(TokenError::MalformedStructure),
            AuthError::TokenMalformed
        );
        assert_eq!(
            AuthError::from(TokenError::UnsupportedAlgorithm),
            AuthError::TokenUnsupportedAlgorithm
        );
    }
}
