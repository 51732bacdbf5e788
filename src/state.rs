// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ElectroHub

use std::sync::Arc;

use jsonwebtoken::DecodingKey;

use crate::catalog::{Catalog, InMemoryCatalog};
use crate::mailer::{Mailer, NullMailer};
use crate::store::{Counters, InMemoryStore, SetStore};
use crate::wishlist::SavedItemsService;

/// Token verification configuration.
///
/// `decoding_key` present means production mode (HS256 verification);
/// absent means development mode (structure-only decoding).
#[derive(Clone, Default)]
pub struct AuthConfig {
    pub decoding_key: Option<DecodingKey>,
    pub issuer: Option<String>,
}

/// Shared application state.
///
/// Capabilities are injected as trait objects, constructed once at process
/// start and shared by reference - there is no lazy global client.
#[derive(Clone)]
pub struct AppState {
    pub saved_items: SavedItemsService,
    pub store: Arc<dyn SetStore>,
    pub counters: Arc<dyn Counters>,
    pub catalog: Arc<dyn Catalog>,
    pub mailer: Arc<dyn Mailer>,
    pub auth: AuthConfig,
    /// Contact-seller messages allowed per user, per item, per day.
    pub contact_daily_limit: i64,
}

impl AppState {
    pub fn new(
        store: Arc<dyn SetStore>,
        counters: Arc<dyn Counters>,
        catalog: Arc<dyn Catalog>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            saved_items: SavedItemsService::new(store.clone()),
            store,
            counters,
            catalog,
            mailer,
            auth: AuthConfig::default(),
            contact_daily_limit: 5,
        }
    }

    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_contact_daily_limit(mut self, limit: i64) -> Self {
        self.contact_daily_limit = limit;
        self
    }
}

/// In-memory wiring, used by tests and local development.
impl Default for AppState {
    fn default() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::new(
            store.clone(),
            store,
            Arc::new(InMemoryCatalog::new()),
            Arc::new(NullMailer),
        )
    }
}
