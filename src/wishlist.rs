// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ElectroHub

//! # Saved-Items Service
//!
//! Per-user wishlist membership over the key-value set store. One Redis set
//! per user, keyed `saved:{user_id}`, gives O(1) add/remove/membership/count
//! without a join-heavy relational table. This is derived state, not a
//! system of record: the relational catalog stays authoritative for listing
//! existence; this store is authoritative only for "did this user click
//! save".
//!
//! Sets carry a 30-day TTL so abandoned accounts age out without a cleanup
//! job. The TTL is (re)armed whenever a member is newly added; arming is
//! best-effort - if the EXPIRE round trip fails the entry stands without a
//! refreshed expiration, which is an accepted degraded state rather than an
//! error. There is no cross-key transaction to make it otherwise.
//!
//! The service is stateless and reentrant. Concurrency correctness is
//! delegated to the store's per-key atomicity; no in-process locking and no
//! retries. Store failures propagate as [`StoreError`] - they are never
//! collapsed into `false` or an empty set, which would make "nothing saved"
//! indistinguishable from "store is down".

use std::collections::HashSet;
use std::sync::Arc;

use tracing::warn;

use crate::store::{SetStore, StoreError};

/// Key prefix for per-user saved-item sets.
const SAVED_KEY_PREFIX: &str = "saved:";

/// Wishlist set lifetime: 30 days, enforced by the store.
pub const WISHLIST_TTL_SECS: i64 = 30 * 24 * 60 * 60;

#[derive(Clone)]
pub struct SavedItemsService {
    store: Arc<dyn SetStore>,
}

impl SavedItemsService {
    pub fn new(store: Arc<dyn SetStore>) -> Self {
        Self { store }
    }

    fn key(user_id: &str) -> String {
        format!("{SAVED_KEY_PREFIX}{user_id}")
    }

    /// Add `item_id` to the user's saved set.
    ///
    /// Returns `true` if the item was newly added, `false` if it was already
    /// present (a no-op, not an error). Callers are expected to have checked
    /// that the item references an active listing; membership itself has no
    /// catalog dependency.
    pub async fn save(&self, user_id: &str, item_id: i64) -> Result<bool, StoreError> {
        let key = Self::key(user_id);
        let added = self.store.sadd(&key, item_id).await?;
        if added == 0 {
            return Ok(false);
        }

        // Second round trip, best-effort: a failed EXPIRE leaves the entry
        // without a refreshed TTL until the next save or an explicit unsave.
        if let Err(err) = self.store.expire(&key, WISHLIST_TTL_SECS).await {
            warn!(user_id, item_id, error = %err, "failed to arm wishlist expiration");
        }
        Ok(true)
    }

    /// Remove `item_id` from the user's saved set.
    ///
    /// Returns `true` if a member was removed, `false` if it was not saved.
    pub async fn unsave(&self, user_id: &str, item_id: i64) -> Result<bool, StoreError> {
        let removed = self.store.srem(&Self::key(user_id), item_id).await?;
        Ok(removed > 0)
    }

    /// Pure membership test; no side effects, no expiration refresh.
    pub async fn is_saved(&self, user_id: &str, item_id: i64) -> Result<bool, StoreError> {
        self.store.sismember(&Self::key(user_id), item_id).await
    }

    /// Full current membership, unordered. Ordering and pagination belong to
    /// the caller, joining these ids against the catalog.
    pub async fn list_saved(&self, user_id: &str) -> Result<HashSet<i64>, StoreError> {
        self.store.smembers(&Self::key(user_id)).await
    }

    /// Current set cardinality; O(1) against the backing store.
    pub async fn count_saved(&self, user_id: &str) -> Result<u64, StoreError> {
        self.store.scard(&Self::key(user_id)).await
    }

    /// Remove the entire set. Returns whether a set existed to remove.
    pub async fn clear_saved(&self, user_id: &str) -> Result<bool, StoreError> {
        let deleted = self.store.del(&Self::key(user_id)).await?;
        Ok(deleted > 0)
    }
}
