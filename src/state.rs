// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::{TokenCodec, UserDirectory};
use crate::ownership::OwnershipLookup;
use crate::store::InMemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub codec: Arc<TokenCodec>,
    pub users: Arc<dyn UserDirectory>,
    pub ownership: Arc<dyn OwnershipLookup>,
    /// Required to sign up with the ADMIN role. Admin sign-up is closed when unset.
    pub admin_signup_token: Option<String>,
}

impl AppState {
    pub fn new(store: InMemoryStore, codec: TokenCodec) -> Self {
        let store = Arc::new(RwLock::new(store));
        Self {
            users: store.clone(),
            ownership: store.clone(),
            store,
            codec: Arc::new(codec),
            admin_signup_token: None,
        }
    }

    pub fn with_admin_signup_token(mut self, token: Option<String>) -> Self {
        self.admin_signup_token = token;
        self
    }
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    use crate::auth::SigningKey;

    let key = SigningKey::from_bytes(&[5u8; 32]).expect("valid test key");
    AppState::new(InMemoryStore::new(), TokenCodec::new(key))
}
