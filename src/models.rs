// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response data structures used by the REST API. All types
//! derive `ToSchema` for the OpenAPI document.
//!
//! ## Model Categories
//!
//! - **Accounts**: Sign-up and login
//! - **Posts**: Board posts owned by their author
//! - **Comments**: Replies to a post, optionally nested under another comment

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::Role;

// =============================================================================
// Account Models
// =============================================================================

/// Request to create an account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignupRequest {
    /// Login handle: 3-20 characters, lowercase letters, digits or `_`.
    pub username: String,
    /// 8-64 printable ASCII characters.
    pub password: String,
    /// Request the ADMIN role.
    #[serde(default)]
    pub admin: bool,
    /// Must match the server's admin sign-up token when `admin` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_token: Option<String>,
}

/// Request to log in.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Issued credentials. The same value is also returned in the
/// `Authorization` response header.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub username: String,
    pub role: Role,
    /// `Bearer <token>`, ready to send back as the `Authorization` header.
    pub authorization: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// Plain acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// =============================================================================
// Post Models
// =============================================================================

/// A board post as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Author, and owner for authorization purposes.
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Request to create or replace a post.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostRequest {
    pub title: String,
    pub content: String,
}

/// A post with its comment tree.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    /// Top-level comments, newest first.
    pub comments: Vec<CommentResponse>,
}

// =============================================================================
// Comment Models
// =============================================================================

/// A comment as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    /// `None` for a top-level comment.
    pub parent_comment_id: Option<String>,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Request to add a comment to a post.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCommentRequest {
    pub content: String,
    /// Reply to this comment instead of the post itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_comment_id: Option<String>,
}

/// Request to replace a comment's text.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateCommentRequest {
    pub content: String,
}

/// A comment with its replies, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_comment_id: Option<String>,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    #[schema(no_recursion)]
    pub replies: Vec<CommentResponse>,
}
