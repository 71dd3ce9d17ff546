// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request authentication stage.
//!
//! Runs before every handler and attaches an [`AuthOutcome`] to the request
//! extensions. It never rejects a request: handlers decide whether their
//! operation needs an authenticated caller.
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/v1/posts", get(list_posts))
//!     .layer(axum::middleware::from_fn_with_state(state.clone(), authenticate))
//!     .with_state(state);
//! ```

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use super::{
    identity::{resolve_identity, UserDirectory},
    outcome::AuthOutcome,
    token::{TokenCodec, BEARER_PREFIX},
};
use crate::state::AppState;

/// Pull the bare token out of an `Authorization` header value.
///
/// Returns `None` for a missing or blank header and for anything that does not
/// start with exactly `"Bearer "`. The remainder is returned untouched.
pub fn extract_token(header: Option<&str>) -> Option<&str> {
    let value = header?;
    if value.trim().is_empty() {
        return None;
    }
    value.strip_prefix(BEARER_PREFIX)
}

/// Classify a request from its `Authorization` header value.
pub async fn authenticate_header(
    codec: &TokenCodec,
    directory: &dyn UserDirectory,
    header: Option<&str>,
) -> AuthOutcome {
    let Some(token) = extract_token(header) else {
        return AuthOutcome::NoToken;
    };

    let claims = match codec.decode(token) {
        Ok(claims) => claims,
        Err(kind) => {
            tracing::info!(reason = %kind, "rejected bearer token");
            return AuthOutcome::InvalidToken(kind);
        }
    };

    match resolve_identity(directory, &claims.sub).await {
        Some(identity) => AuthOutcome::Authenticated(identity),
        None => {
            tracing::info!(sub = %claims.sub, "token subject is not a known user");
            AuthOutcome::UnknownUser
        }
    }
}

/// Authentication middleware function.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let outcome = authenticate_header(&state.codec, state.users.as_ref(), header.as_deref()).await;
    tracing::debug!(outcome = outcome.label(), "request authenticated");

    request.extensions_mut().insert(outcome);
    next.run(request).await
}
