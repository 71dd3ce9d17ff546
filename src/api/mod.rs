// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{authenticate, Identity, Role},
    models::{
        CommentResponse, CreateCommentRequest, LoginRequest, LoginResponse, MessageResponse,
        PostRequest, PostResponse, SignupRequest, UpdateCommentRequest,
    },
    state::AppState,
};

pub mod access;
pub mod accounts;
pub mod comments;
pub mod health;
pub mod posts;
pub mod users;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/auth/signup", post(accounts::signup))
        .route("/auth/login", post(accounts::login))
        .route("/users/me", get(users::get_current_user))
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/posts/{post_id}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/posts/{post_id}/comments", post(comments::create_comment))
        .route(
            "/comments/{comment_id}",
            put(comments::update_comment).delete(comments::delete_comment),
        )
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .with_state(state);

    Router::new()
        .route("/health", get(health::liveness))
        .nest("/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::liveness,
        accounts::signup,
        accounts::login,
        users::get_current_user,
        posts::list_posts,
        posts::get_post,
        posts::create_post,
        posts::update_post,
        posts::delete_post,
        comments::create_comment,
        comments::update_comment,
        comments::delete_comment
    ),
    components(
        schemas(
            Identity,
            Role,
            SignupRequest,
            LoginRequest,
            LoginResponse,
            MessageResponse,
            PostRequest,
            PostResponse,
            CreateCommentRequest,
            UpdateCommentRequest,
            CommentResponse
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Accounts", description = "Sign-up and login"),
        (name = "Users", description = "Current user"),
        (name = "Posts", description = "Board posts"),
        (name = "Comments", description = "Comments and replies")
    )
)]
struct ApiDoc;
