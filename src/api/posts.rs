// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Post endpoints.
//!
//! Listing and reading are open to anonymous callers. Creating requires a
//! signed-in user; updating and deleting additionally require ownership or
//! the ADMIN role.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::access::authorize_mutation;
use crate::{
    auth::{Auth, Outcome},
    error::ApiError,
    models::{PostRequest, PostResponse},
    ownership::ResourceRef,
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/v1/posts",
    tag = "Posts",
    responses((status = 200, description = "All posts, most recently modified first", body = [PostResponse]))
)]
pub async fn list_posts(State(state): State<AppState>) -> Json<Vec<PostResponse>> {
    let store = state.store.read().await;
    Json(store.list_posts())
}

#[utoipa::path(
    get,
    path = "/v1/posts/{post_id}",
    params(("post_id" = String, Path, description = "Identifier of the post")),
    tag = "Posts",
    responses(
        (status = 200, body = PostResponse),
        (status = 404, description = "Post not found"),
    )
)]
pub async fn get_post(
    Path(post_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<PostResponse>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.get_post(&post_id)?))
}

#[utoipa::path(
    post,
    path = "/v1/posts",
    request_body = PostRequest,
    tag = "Posts",
    security(("bearer" = [])),
    responses(
        (status = 201, body = PostResponse),
        (status = 401, description = "Not authenticated"),
    )
)]
pub async fn create_post(
    Auth(identity): Auth,
    State(state): State<AppState>,
    Json(request): Json<PostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let mut store = state.store.write().await;
    let post = store.create_post(request, &identity.subject)?;
    Ok((StatusCode::CREATED, Json(post)))
}

#[utoipa::path(
    put,
    path = "/v1/posts/{post_id}",
    params(("post_id" = String, Path, description = "Identifier of the post")),
    request_body = PostRequest,
    tag = "Posts",
    security(("bearer" = [])),
    responses(
        (status = 200, body = PostResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the author and not an admin"),
        (status = 404, description = "Post not found"),
    )
)]
pub async fn update_post(
    Outcome(outcome): Outcome,
    Path(post_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<PostRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    authorize_mutation(&state, &outcome, &ResourceRef::Post(post_id.clone())).await?;
    let mut store = state.store.write().await;
    Ok(Json(store.update_post(&post_id, request)?))
}

#[utoipa::path(
    delete,
    path = "/v1/posts/{post_id}",
    params(("post_id" = String, Path, description = "Identifier of the post")),
    tag = "Posts",
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Post and its comments deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the author and not an admin"),
        (status = 404, description = "Post not found"),
    )
)]
pub async fn delete_post(
    Outcome(outcome): Outcome,
    Path(post_id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    authorize_mutation(&state, &outcome, &ResourceRef::Post(post_id.clone())).await?;
    let mut store = state.store.write().await;
    store.delete_post(&post_id)?;
    Ok(StatusCode::NO_CONTENT)
}
