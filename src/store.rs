// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory store for users, posts and comments.
//!
//! The store is shared behind a `tokio::sync::RwLock` and also serves as the
//! [`UserDirectory`] and [`OwnershipLookup`] collaborators of the auth layer.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::{PasswordDigest, Role, UserDirectory, UserRecord};
use crate::error::ApiError;
use crate::models::{
    Comment, CommentResponse, CreateCommentRequest, Post, PostRequest, PostResponse,
    UpdateCommentRequest,
};
use crate::ownership::{OwnedResource, OwnershipLookup, ResourceRef};

#[derive(Debug, Clone)]
struct StoredUser {
    role: Role,
    password: PasswordDigest,
}

#[derive(Default)]
pub struct InMemoryStore {
    users: HashMap<String, StoredUser>,
    posts: HashMap<String, Post>,
    comments: HashMap<String, Comment>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------------

    pub fn insert_user(
        &mut self,
        username: impl Into<String>,
        password: &str,
        role: Role,
    ) -> Result<UserRecord, ApiError> {
        let username = username.into();
        if self.users.contains_key(&username) {
            return Err(ApiError::conflict("Username is already taken"));
        }
        let password = PasswordDigest::new(password).map_err(|e| {
            tracing::error!(username = %username, "password hashing failed: {e}");
            ApiError::internal("Failed to store password")
        })?;
        self.users
            .insert(username.clone(), StoredUser { role, password });
        Ok(UserRecord {
            subject: username,
            role,
        })
    }

    pub fn user(&self, username: &str) -> Option<UserRecord> {
        self.users.get(username).map(|user| UserRecord {
            subject: username.to_string(),
            role: user.role,
        })
    }

    /// Returns the user only if the password matches.
    pub fn verify_credentials(&self, username: &str, password: &str) -> Option<UserRecord> {
        let user = self.users.get(username)?;
        user.password.verify(password).then(|| UserRecord {
            subject: username.to_string(),
            role: user.role,
        })
    }

    pub fn set_role(&mut self, username: &str, role: Role) -> Result<(), ApiError> {
        let Some(user) = self.users.get_mut(username) else {
            return Err(ApiError::not_found("User not found"));
        };
        user.role = role;
        Ok(())
    }

    pub fn remove_user(&mut self, username: &str) -> bool {
        self.users.remove(username).is_some()
    }

    // -------------------------------------------------------------------------
    // Posts
    // -------------------------------------------------------------------------

    /// All posts, most recently modified first, each with its comment tree.
    pub fn list_posts(&self) -> Vec<PostResponse> {
        let mut posts: Vec<&Post> = self.posts.values().collect();
        posts.sort_by(|a, b| {
            b.modified_at
                .cmp(&a.modified_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        posts.into_iter().map(|post| self.post_response(post)).collect()
    }

    pub fn get_post(&self, post_id: &str) -> Result<PostResponse, ApiError> {
        self.posts
            .get(post_id)
            .map(|post| self.post_response(post))
            .ok_or_else(|| ApiError::not_found("Post not found"))
    }

    pub fn create_post(&mut self, request: PostRequest, username: &str) -> Result<PostResponse, ApiError> {
        self.create_post_at(request, username, Utc::now())
    }

    pub fn create_post_at(
        &mut self,
        request: PostRequest,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<PostResponse, ApiError> {
        validate_post(&request)?;
        let id = Uuid::new_v4().to_string();
        let post = Post {
            id: id.clone(),
            title: request.title,
            content: request.content,
            username: username.to_string(),
            created_at: now,
            modified_at: now,
        };
        let response = self.post_response(&post);
        self.posts.insert(id, post);
        Ok(response)
    }

    pub fn update_post(&mut self, post_id: &str, request: PostRequest) -> Result<PostResponse, ApiError> {
        validate_post(&request)?;
        let Some(post) = self.posts.get_mut(post_id) else {
            return Err(ApiError::not_found("Post not found"));
        };
        post.title = request.title;
        post.content = request.content;
        post.modified_at = Utc::now();
        let post = post.clone();
        Ok(self.post_response(&post))
    }

    /// Delete a post together with all of its comments.
    pub fn delete_post(&mut self, post_id: &str) -> Result<(), ApiError> {
        if self.posts.remove(post_id).is_none() {
            return Err(ApiError::not_found("Post not found"));
        }
        self.comments.retain(|_, comment| comment.post_id != post_id);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Comments
    // -------------------------------------------------------------------------

    pub fn create_comment(
        &mut self,
        post_id: &str,
        request: CreateCommentRequest,
        username: &str,
    ) -> Result<CommentResponse, ApiError> {
        validate_comment(&request.content)?;
        if !self.posts.contains_key(post_id) {
            return Err(ApiError::not_found("Post not found"));
        }
        if let Some(parent_id) = &request.parent_comment_id {
            match self.comments.get(parent_id) {
                Some(parent) if parent.post_id == post_id => {}
                _ => return Err(ApiError::not_found("Parent comment not found")),
            }
        }

        let now = Utc::now();
        let comment = Comment {
            id: Uuid::new_v4().to_string(),
            post_id: post_id.to_string(),
            parent_comment_id: request.parent_comment_id,
            username: username.to_string(),
            content: request.content,
            created_at: now,
            modified_at: now,
        };
        self.comments.insert(comment.id.clone(), comment.clone());
        Ok(self.comment_response(&comment))
    }

    pub fn update_comment(
        &mut self,
        comment_id: &str,
        request: UpdateCommentRequest,
    ) -> Result<CommentResponse, ApiError> {
        validate_comment(&request.content)?;
        let Some(comment) = self.comments.get_mut(comment_id) else {
            return Err(ApiError::not_found("Comment not found"));
        };
        comment.content = request.content;
        comment.modified_at = Utc::now();
        let comment = comment.clone();
        Ok(self.comment_response(&comment))
    }

    /// Delete a comment and every reply beneath it.
    pub fn delete_comment(&mut self, comment_id: &str) -> Result<(), ApiError> {
        if !self.comments.contains_key(comment_id) {
            return Err(ApiError::not_found("Comment not found"));
        }
        let mut pending = vec![comment_id.to_string()];
        while let Some(id) = pending.pop() {
            self.comments.remove(&id);
            pending.extend(
                self.comments
                    .values()
                    .filter(|c| c.parent_comment_id.as_deref() == Some(id.as_str()))
                    .map(|c| c.id.clone()),
            );
        }
        Ok(())
    }

    pub fn owner_of(&self, resource: &ResourceRef) -> Option<String> {
        match resource {
            ResourceRef::Post(id) => self.posts.get(id).map(|p| p.owner().to_string()),
            ResourceRef::Comment(id) => self.comments.get(id).map(|c| c.owner().to_string()),
        }
    }

    // -------------------------------------------------------------------------
    // Response assembly
    // -------------------------------------------------------------------------

    fn post_response(&self, post: &Post) -> PostResponse {
        PostResponse {
            id: post.id.clone(),
            title: post.title.clone(),
            content: post.content.clone(),
            username: post.username.clone(),
            created_at: post.created_at,
            modified_at: post.modified_at,
            comments: self.replies(&post.id, None),
        }
    }

    fn comment_response(&self, comment: &Comment) -> CommentResponse {
        CommentResponse {
            id: comment.id.clone(),
            post_id: comment.post_id.clone(),
            parent_comment_id: comment.parent_comment_id.clone(),
            username: comment.username.clone(),
            content: comment.content.clone(),
            created_at: comment.created_at,
            modified_at: comment.modified_at,
            replies: self.replies(&comment.post_id, Some(&comment.id)),
        }
    }

    /// Children of `parent` (top level when `None`), newest first.
    fn replies(&self, post_id: &str, parent: Option<&str>) -> Vec<CommentResponse> {
        let mut children: Vec<&Comment> = self
            .comments
            .values()
            .filter(|c| c.post_id == post_id && c.parent_comment_id.as_deref() == parent)
            .collect();
        children.sort_by(|a, b| {
            b.modified_at
                .cmp(&a.modified_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        children
            .into_iter()
            .map(|c| self.comment_response(c))
            .collect()
    }
}

fn validate_post(request: &PostRequest) -> Result<(), ApiError> {
    if request.title.trim().is_empty() {
        return Err(ApiError::bad_request("title must not be empty"));
    }
    if request.content.trim().is_empty() {
        return Err(ApiError::bad_request("content must not be empty"));
    }
    Ok(())
}

fn validate_comment(content: &str) -> Result<(), ApiError> {
    if content.trim().is_empty() {
        return Err(ApiError::bad_request("content must not be empty"));
    }
    Ok(())
}

#[async_trait]
impl UserDirectory for RwLock<InMemoryStore> {
    async fn find_user(&self, subject: &str) -> Option<UserRecord> {
        self.read().await.user(subject)
    }
}

#[async_trait]
impl OwnershipLookup for RwLock<InMemoryStore> {
    async fn find_owner_of(&self, resource: &ResourceRef) -> Option<String> {
        self.read().await.owner_of(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::Duration;

    fn post(title: &str) -> PostRequest {
        PostRequest {
            title: title.to_string(),
            content: "body".to_string(),
        }
    }

    fn comment(content: &str, parent: Option<&str>) -> CreateCommentRequest {
        CreateCommentRequest {
            content: content.to_string(),
            parent_comment_id: parent.map(str::to_string),
        }
    }

    #[test]
    fn duplicate_username_conflicts() {
        let mut store = InMemoryStore::new();
        store.insert_user("alice", "password1", Role::User).unwrap();
        let err = store.insert_user("alice", "password2", Role::Admin).unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[test]
    fn credentials_are_checked() {
        let mut store = InMemoryStore::new();
        store.insert_user("alice", "password1", Role::User).unwrap();
        assert!(store.verify_credentials("alice", "password1").is_some());
        assert!(store.verify_credentials("alice", "password2").is_none());
        assert!(store.verify_credentials("bob", "password1").is_none());
    }

    #[test]
    fn posts_are_listed_newest_first() {
        let mut store = InMemoryStore::new();
        let now = Utc::now();
        store
            .create_post_at(post("old"), "alice", now - Duration::minutes(5))
            .unwrap();
        store.create_post_at(post("new"), "bob", now).unwrap();

        let titles: Vec<String> = store.list_posts().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["new", "old"]);
    }

    #[test]
    fn updated_post_moves_to_front() {
        let mut store = InMemoryStore::new();
        let now = Utc::now();
        let first = store
            .create_post_at(post("first"), "alice", now - Duration::minutes(10))
            .unwrap();
        store
            .create_post_at(post("second"), "alice", now - Duration::minutes(5))
            .unwrap();
        store.update_post(&first.id, post("first, edited")).unwrap();

        assert_eq!(store.list_posts()[0].title, "first, edited");
    }

    #[test]
    fn empty_title_is_rejected() {
        let mut store = InMemoryStore::new();
        let err = store.create_post(post("  "), "alice").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_post_is_not_found() {
        let mut store = InMemoryStore::new();
        assert_eq!(store.get_post("nope").unwrap_err().status, StatusCode::NOT_FOUND);
        assert_eq!(
            store.update_post("nope", post("x")).unwrap_err().status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(store.delete_post("nope").unwrap_err().status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn comments_form_a_tree_under_the_post() {
        let mut store = InMemoryStore::new();
        let p = store.create_post(post("hello"), "alice").unwrap();
        let top = store
            .create_comment(&p.id, comment("top", None), "bob")
            .unwrap();
        store
            .create_comment(&p.id, comment("reply", Some(&top.id)), "alice")
            .unwrap();

        let fetched = store.get_post(&p.id).unwrap();
        assert_eq!(fetched.comments.len(), 1);
        assert_eq!(fetched.comments[0].content, "top");
        assert_eq!(fetched.comments[0].replies.len(), 1);
        assert_eq!(fetched.comments[0].replies[0].content, "reply");
    }

    #[test]
    fn parent_must_belong_to_same_post() {
        let mut store = InMemoryStore::new();
        let a = store.create_post(post("a"), "alice").unwrap();
        let b = store.create_post(post("b"), "alice").unwrap();
        let on_a = store.create_comment(&a.id, comment("x", None), "bob").unwrap();

        let err = store
            .create_comment(&b.id, comment("y", Some(&on_a.id)), "bob")
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn deleting_comment_removes_replies() {
        let mut store = InMemoryStore::new();
        let p = store.create_post(post("hello"), "alice").unwrap();
        let top = store.create_comment(&p.id, comment("top", None), "bob").unwrap();
        let reply = store
            .create_comment(&p.id, comment("reply", Some(&top.id)), "bob")
            .unwrap();
        store
            .create_comment(&p.id, comment("nested", Some(&reply.id)), "bob")
            .unwrap();

        store.delete_comment(&top.id).unwrap();
        assert!(store.get_post(&p.id).unwrap().comments.is_empty());
        assert!(store.comments.is_empty());
    }

    #[test]
    fn deleting_post_removes_its_comments() {
        let mut store = InMemoryStore::new();
        let keep = store.create_post(post("keep"), "alice").unwrap();
        let gone = store.create_post(post("gone"), "alice").unwrap();
        store.create_comment(&keep.id, comment("k", None), "bob").unwrap();
        store.create_comment(&gone.id, comment("g", None), "bob").unwrap();

        store.delete_post(&gone.id).unwrap();
        assert_eq!(store.comments.len(), 1);
        assert_eq!(store.get_post(&keep.id).unwrap().comments.len(), 1);
    }

    #[tokio::test]
    async fn lock_serves_as_collaborator() {
        let mut store = InMemoryStore::new();
        store.insert_user("alice", "password1", Role::User).unwrap();
        let p = store.create_post(post("hello"), "alice").unwrap();
        let shared = RwLock::new(store);

        assert_eq!(
            shared.find_user("alice").await,
            Some(UserRecord {
                subject: "alice".to_string(),
                role: Role::User
            })
        );
        assert!(shared.find_user("bob").await.is_none());
        assert_eq!(
            shared.find_owner_of(&ResourceRef::Post(p.id)).await,
            Some("alice".to_string())
        );
        assert!(shared
            .find_owner_of(&ResourceRef::Comment("missing".to_string()))
            .await
            .is_none());
    }
}
