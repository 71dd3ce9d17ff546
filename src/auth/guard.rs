// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Role + ownership rule for mutating operations on owned resources.

use super::{outcome::AuthOutcome, AuthError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    NotAuthenticated,
    NotOwner,
}

impl From<DenyReason> for AuthError {
    fn from(reason: DenyReason) -> Self {
        match reason {
            DenyReason::NotAuthenticated => AuthError::NotAuthenticated,
            DenyReason::NotOwner => AuthError::NotOwner,
        }
    }
}

/// Decide whether the caller may mutate a resource.
///
/// Evaluated in order: unauthenticated callers are denied, admins are allowed
/// regardless of ownership, everyone else must own the resource.
pub fn authorize(outcome: &AuthOutcome, ownership: bool) -> Decision {
    let Some(identity) = outcome.identity() else {
        return Decision::Deny(DenyReason::NotAuthenticated);
    };
    if identity.is_admin() {
        return Decision::Allow;
    }
    if ownership {
        Decision::Allow
    } else {
        Decision::Deny(DenyReason::NotOwner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Identity, Role, TokenError};

    fn signed_in(role: Role) -> AuthOutcome {
        AuthOutcome::Authenticated(Identity::new("someone", role))
    }

    #[test]
    fn admin_bypasses_ownership() {
        assert_eq!(authorize(&signed_in(Role::Admin), false), Decision::Allow);
        assert_eq!(authorize(&signed_in(Role::Admin), true), Decision::Allow);
    }

    #[test]
    fn user_needs_ownership() {
        assert_eq!(authorize(&signed_in(Role::User), true), Decision::Allow);
        assert_eq!(
            authorize(&signed_in(Role::User), false),
            Decision::Deny(DenyReason::NotOwner)
        );
    }

    #[test]
    fn unauthenticated_is_denied_regardless_of_ownership() {
        let outcomes = [
            AuthOutcome::NoToken,
            AuthOutcome::UnknownUser,
            AuthOutcome::InvalidToken(TokenError::SignatureMismatch),
        ];
        for outcome in &outcomes {
            for ownership in [true, false] {
                assert_eq!(
                    authorize(outcome, ownership),
                    Decision::Deny(DenyReason::NotAuthenticated)
                );
            }
        }
    }
}
