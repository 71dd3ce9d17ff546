// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Identity resolution from a verified token subject.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::roles::Role;

/// The authenticated caller for a single request.
///
/// Built fresh on every request from the user directory; never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    /// Username (token `sub` claim)
    pub subject: String,
    /// Role from the stored user record
    pub role: Role,
}

impl Identity {
    pub fn new(subject: impl Into<String>, role: Role) -> Self {
        Self {
            subject: subject.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// A stored user as seen by the authentication layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub subject: String,
    pub role: Role,
}

/// Lookup of users by subject.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns `None` when no user with this subject exists.
    async fn find_user(&self, subject: &str) -> Option<UserRecord>;
}

/// Resolve a verified subject into an [`Identity`].
///
/// The role comes from the live user record, so a role change applies on the
/// next request even if the token still carries the old role.
pub async fn resolve_identity(directory: &dyn UserDirectory, subject: &str) -> Option<Identity> {
    let record = directory.find_user(subject).await?;
    Some(Identity {
        subject: record.subject,
        role: record.role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FixedDirectory(HashMap<String, Role>);

    #[async_trait]
    impl UserDirectory for FixedDirectory {
        async fn find_user(&self, subject: &str) -> Option<UserRecord> {
            self.0.get(subject).map(|role| UserRecord {
                subject: subject.to_string(),
                role: *role,
            })
        }
    }

    #[tokio::test]
    async fn resolves_known_subject_with_stored_role() {
        let directory = FixedDirectory(HashMap::from([("root".to_string(), Role::Admin)]));
        let identity = resolve_identity(&directory, "root").await.unwrap();
        assert_eq!(identity, Identity::new("root", Role::Admin));
        assert!(identity.is_admin());
    }

    #[tokio::test]
    async fn unknown_subject_resolves_to_none() {
        let directory = FixedDirectory(HashMap::new());
        assert!(resolve_identity(&directory, "ghost").await.is_none());
    }
}
