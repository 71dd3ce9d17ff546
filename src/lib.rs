// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Board Server - bulletin board API with bearer-token authentication
//!
//! Every request passes through the authentication middleware, which attaches
//! exactly one [`auth::AuthOutcome`] and always forwards the request. Handlers
//! decide what the outcome permits: reads are public, creation needs a signed-in
//! user, and edits or deletes need ownership of the target or the ADMIN role.
//!
//! ## Modules
//!
//! - `api` - HTTP handlers and router (Axum)
//! - `auth` - Signing key, token codec, middleware and authorization guard
//! - `store` - In-memory users, posts and comment trees
//! - `config` - Environment configuration

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod ownership;
pub mod state;
pub mod store;
pub mod telemetry;
