// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors over the per-request [`AuthOutcome`].
//!
//! The authentication middleware must be layered over any route using these.
//!
//! ```rust,ignore
//! async fn create_post(Auth(identity): Auth, ...) -> impl IntoResponse {
//!     // identity.subject is the caller
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{AuthError, AuthOutcome, Identity};

/// The raw outcome, for handlers that apply the guard themselves.
pub struct Outcome(pub AuthOutcome);

impl<S: Send + Sync> FromRequestParts<S> for Outcome {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthOutcome>()
            .cloned()
            .map(Outcome)
            .ok_or_else(|| {
                tracing::error!("authentication stage did not run for this route");
                AuthError::InternalError("authentication stage did not run".to_string())
            })
    }
}

/// Requires an authenticated caller.
///
/// Rejects with the specific reason (absent, expired, unknown user, ...).
pub struct Auth(pub Identity);

impl<S: Send + Sync> FromRequestParts<S> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Outcome(outcome) = Outcome::from_request_parts(parts, state).await?;
        let identity = outcome.require()?.clone();
        Ok(Auth(identity))
    }
}
