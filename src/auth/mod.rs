// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Bearer-token authentication and ownership-based authorization for the
//! board API.
//!
//! ## Auth Flow
//!
//! 1. Client logs in and receives `Bearer <token>` (HS256, one hour)
//! 2. Client sends `Authorization: Bearer <token>` on later requests
//! 3. Server, once per request:
//!    - Extracts the token from the header
//!    - Verifies signature, algorithm and expiry
//!    - Looks up `sub` in the user store to get the live role
//!    - Attaches an [`AuthOutcome`] to the request extensions
//! 4. Handlers for mutating operations call [`guard::authorize`] with the
//!    outcome and the resource's ownership fact
//!
//! ## Security
//!
//! - The signing key is at least 256 bits and never changes at runtime
//! - Only `HS256` is accepted; `none` and other algorithms are refused
//! - No clock skew leeway on expiry
//! - There is no revocation list: a token is valid until it expires

pub mod error;
pub mod extractor;
pub mod guard;
pub mod identity;
pub mod middleware;
pub mod outcome;
pub mod password;
pub mod roles;
pub mod signing_key;
pub mod token;

pub use error::AuthError;
pub use extractor::{Auth, Outcome};
pub use guard::{authorize, Decision, DenyReason};
pub use identity::{resolve_identity, Identity, UserDirectory, UserRecord};
pub use middleware::{authenticate, extract_token};
pub use outcome::AuthOutcome;
pub use password::PasswordDigest;
pub use roles::Role;
pub use signing_key::{KeyError, SigningKey};
pub use token::{IssueError, TokenClaims, TokenCodec, TokenError, BEARER_PREFIX, TOKEN_TTL_SECS};
