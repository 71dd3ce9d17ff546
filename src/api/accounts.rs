// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Sign-up and login.
//!
//! Login is the only place tokens are issued. The token is returned in the
//! `Authorization` response header and echoed in the body.

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, StatusCode},
    response::IntoResponse,
    Json,
};
use subtle::ConstantTimeEq;

use crate::{
    auth::{Role, TOKEN_TTL_SECS},
    error::ApiError,
    models::{LoginRequest, LoginResponse, MessageResponse, SignupRequest},
    state::AppState,
};

const USERNAME_LEN: std::ops::RangeInclusive<usize> = 3..=20;
const PASSWORD_LEN: std::ops::RangeInclusive<usize> = 8..=64;

fn validate_username(username: &str) -> Result<(), ApiError> {
    let valid = USERNAME_LEN.contains(&username.len())
        && username
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ApiError::bad_request(
            "username must be 3-20 characters of lowercase letters, digits or '_'",
        ))
    }
}

fn validate_password(password: &str) -> Result<(), ApiError> {
    let valid = PASSWORD_LEN.contains(&password.len())
        && password.chars().all(|c| c.is_ascii_graphic());
    if valid {
        Ok(())
    } else {
        Err(ApiError::bad_request(
            "password must be 8-64 printable ASCII characters",
        ))
    }
}

/// Admin sign-up is closed when no token is configured.
fn admin_token_matches(expected: Option<&str>, given: Option<&str>) -> bool {
    match (expected, given) {
        (Some(expected), Some(given)) => expected.as_bytes().ct_eq(given.as_bytes()).into(),
        _ => false,
    }
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/v1/auth/signup",
    tag = "Accounts",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, description = "Invalid username, password or admin token"),
        (status = 409, description = "Username already taken"),
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    validate_username(&request.username)?;
    validate_password(&request.password)?;

    let role = if request.admin {
        let expected = state.admin_signup_token.as_deref();
        if !admin_token_matches(expected, request.admin_token.as_deref()) {
            tracing::info!(username = %request.username, "admin sign-up refused");
            return Err(ApiError::bad_request("admin token does not match"));
        }
        Role::Admin
    } else {
        Role::User
    };

    let mut store = state.store.write().await;
    let user = store.insert_user(&request.username, &request.password, role)?;
    tracing::info!(username = %user.subject, role = %user.role, "account created");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Sign-up successful")),
    ))
}

/// Log in and receive a bearer token.
#[utoipa::path(
    post,
    path = "/v1/auth/login",
    tag = "Accounts",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued; also set in the Authorization header", body = LoginResponse),
        (status = 401, description = "Invalid username or password"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .store
        .read()
        .await
        .verify_credentials(&request.username, &request.password)
        .ok_or_else(|| {
            tracing::info!(username = %request.username, "login failed");
            ApiError::unauthorized("Invalid username or password")
        })?;

    let authorization = state
        .codec
        .encode(&user.subject, user.role)
        .map_err(|e| ApiError::internal(format!("Failed to issue token: {e}")))?;

    let body = LoginResponse {
        username: user.subject,
        role: user.role,
        authorization: authorization.clone(),
        expires_in: TOKEN_TTL_SECS,
    };
    Ok((StatusCode::OK, [(AUTHORIZATION, authorization)], Json(body)))
}
