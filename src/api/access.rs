// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared authorization step for mutating handlers.

use crate::{
    auth::{authorize, AuthError, AuthOutcome, Decision},
    error::ApiError,
    ownership::ResourceRef,
    state::AppState,
};

/// Gate a mutation of `target`.
///
/// Fails with 401 when the caller is not authenticated, 404 when the target
/// does not exist, and 403 when the guard denies the caller.
pub async fn authorize_mutation(
    state: &AppState,
    outcome: &AuthOutcome,
    target: &ResourceRef,
) -> Result<(), ApiError> {
    let identity = outcome.require()?;

    let owner = state
        .ownership
        .find_owner_of(target)
        .await
        .ok_or_else(|| match target {
            ResourceRef::Post(_) => ApiError::not_found("Post not found"),
            ResourceRef::Comment(_) => ApiError::not_found("Comment not found"),
        })?;

    match authorize(outcome, owner == identity.subject) {
        Decision::Allow => Ok(()),
        Decision::Deny(reason) => {
            tracing::info!(
                subject = %identity.subject,
                resource = target.kind(),
                id = target.id(),
                "mutation denied"
            );
            Err(AuthError::from(reason).into())
        }
    }
}
