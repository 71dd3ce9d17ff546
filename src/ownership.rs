// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ownership lookups for the authorization guard.
//!
//! The guard only needs one fact per operation: does the target resource
//! belong to the caller. Storage answers it through [`OwnershipLookup`].

use async_trait::async_trait;

use crate::models::{Comment, Post};

/// Trait for resources that have an owner.
pub trait OwnedResource {
    /// Get the owner's username.
    fn owner(&self) -> &str;
}

impl OwnedResource for Post {
    fn owner(&self) -> &str {
        &self.username
    }
}

impl OwnedResource for Comment {
    fn owner(&self) -> &str {
        &self.username
    }
}

/// A resource that can be the target of a mutating operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRef {
    Post(String),
    Comment(String),
}

impl ResourceRef {
    pub fn kind(&self) -> &'static str {
        match self {
            ResourceRef::Post(_) => "post",
            ResourceRef::Comment(_) => "comment",
        }
    }

    pub fn id(&self) -> &str {
        match self {
            ResourceRef::Post(id) | ResourceRef::Comment(id) => id,
        }
    }
}

/// Owner lookup by resource.
#[async_trait]
pub trait OwnershipLookup: Send + Sync {
    /// Returns the owner's username, or `None` if the resource does not exist.
    async fn find_owner_of(&self, resource: &ResourceRef) -> Option<String>;
}
