// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::access::authorize_mutation;
use crate::{
    auth::{Auth, Outcome},
    error::ApiError,
    models::{CommentResponse, CreateCommentRequest, UpdateCommentRequest},
    ownership::ResourceRef,
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/v1/posts/{post_id}/comments",
    params(("post_id" = String, Path, description = "Post to comment on")),
    request_body = CreateCommentRequest,
    tag = "Comments",
    security(("bearer" = [])),
    responses(
        (status = 201, body = CommentResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Post or parent comment not found"),
    )
)]
pub async fn create_comment(
    Auth(identity): Auth,
    Path(post_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let mut store = state.store.write().await;
    let comment = store.create_comment(&post_id, request, &identity.subject)?;
    Ok((StatusCode::CREATED, Json(comment)))
}

#[utoipa::path(
    put,
    path = "/v1/comments/{comment_id}",
    params(("comment_id" = String, Path, description = "Identifier of the comment")),
    request_body = UpdateCommentRequest,
    tag = "Comments",
    security(("bearer" = [])),
    responses(
        (status = 200, body = CommentResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the author and not an admin"),
        (status = 404, description = "Comment not found"),
    )
)]
pub async fn update_comment(
    Outcome(outcome): Outcome,
    Path(comment_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<UpdateCommentRequest>,
) -> Result<Json<CommentResponse>, ApiError> {
    authorize_mutation(&state, &outcome, &ResourceRef::Comment(comment_id.clone())).await?;
    let mut store = state.store.write().await;
    Ok(Json(store.update_comment(&comment_id, request)?))
}

#[utoipa::path(
    delete,
    path = "/v1/comments/{comment_id}",
    params(("comment_id" = String, Path, description = "Identifier of the comment")),
    tag = "Comments",
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Comment and its replies deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the author and not an admin"),
        (status = 404, description = "Comment not found"),
    )
)]
pub async fn delete_comment(
    Outcome(outcome): Outcome,
    Path(comment_id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    authorize_mutation(&state, &outcome, &ResourceRef::Comment(comment_id.clone())).await?;
    let mut store = state.store.write().await;
    store.delete_comment(&comment_id)?;
    Ok(StatusCode::NO_CONTENT)
}
