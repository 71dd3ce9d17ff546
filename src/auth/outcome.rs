// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-request authentication result.

use super::{identity::Identity, token::TokenError, AuthError};

/// What the authentication stage concluded about a request.
///
/// Exactly one value is attached to each request's extensions and it is never
/// replaced afterwards. Handlers decide whether anything other than
/// `Authenticated` is acceptable for their operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated(Identity),
    NoToken,
    InvalidToken(TokenError),
    UnknownUser,
}

impl AuthOutcome {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            AuthOutcome::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }

    /// The identity, or the specific reason there is none.
    pub fn require(&self) -> Result<&Identity, AuthError> {
        match self {
            AuthOutcome::Authenticated(identity) => Ok(identity),
            AuthOutcome::NoToken => Err(AuthError::TokenAbsent),
            AuthOutcome::InvalidToken(kind) => Err((*kind).into()),
            AuthOutcome::UnknownUser => Err(AuthError::UserUnknown),
        }
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            AuthOutcome::Authenticated(_) => "authenticated",
            AuthOutcome::NoToken => "no_token",
            AuthOutcome::InvalidToken(_) => "invalid_token",
            AuthOutcome::UnknownUser => "unknown_user",
        }
    }
}
