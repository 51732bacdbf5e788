// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ElectroHub

//! In-memory set store for tests and local development.
//!
//! Mirrors the observable contract of the Redis implementation: atomic
//! per-key set primitives, idempotent membership, and TTL arming. TTLs are
//! recorded, not enforced - expiration is exercised through
//! [`InMemoryStore::armed_ttl`] rather than by sweeping. The store can be
//! flipped unavailable to test failure propagation.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Counters, SetStore, StoreError};

#[derive(Default)]
pub struct InMemoryStore {
    sets: RwLock<HashMap<String, HashSet<i64>>>,
    counters: RwLock<HashMap<String, i64>>,
    ttls: RwLock<HashMap<String, i64>>,
    unavailable: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the store being unreachable; every subsequent operation
    /// fails with [`StoreError::Unavailable`] until flipped back.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// The TTL most recently armed on `key`, if any.
    pub async fn armed_ttl(&self, key: &str) -> Option<i64> {
        self.ttls.read().await.get(key).copied()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("simulated outage".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SetStore for InMemoryStore {
    async fn sadd(&self, key: &str, member: i64) -> Result<u64, StoreError> {
        self.check_available()?;
        let mut sets = self.sets.write().await;
        let added = sets.entry(key.to_string()).or_default().insert(member);
        Ok(u64::from(added))
    }

    async fn srem(&self, key: &str, member: i64) -> Result<u64, StoreError> {
        self.check_available()?;
        let mut sets = self.sets.write().await;
        let removed = sets.get_mut(key).is_some_and(|set| set.remove(&member));
        Ok(u64::from(removed))
    }

    async fn smembers(&self, key: &str) -> Result<HashSet<i64>, StoreError> {
        self.check_available()?;
        Ok(self.sets.read().await.get(key).cloned().unwrap_or_default())
    }

    async fn sismember(&self, key: &str, member: i64) -> Result<bool, StoreError> {
        self.check_available()?;
        Ok(self
            .sets
            .read()
            .await
            .get(key)
            .is_some_and(|set| set.contains(&member)))
    }

    async fn scard(&self, key: &str) -> Result<u64, StoreError> {
        self.check_available()?;
        Ok(self
            .sets
            .read()
            .await
            .get(key)
            .map_or(0, |set| set.len() as u64))
    }

    async fn expire(&self, key: &str, seconds: i64) -> Result<bool, StoreError> {
        self.check_available()?;
        let exists = self.sets.read().await.contains_key(key)
            || self.counters.read().await.contains_key(key);
        if exists {
            self.ttls.write().await.insert(key.to_string(), seconds);
        }
        Ok(exists)
    }

    async fn del(&self, key: &str) -> Result<u64, StoreError> {
        self.check_available()?;
        let removed = self.sets.write().await.remove(key).is_some();
        self.ttls.write().await.remove(key);
        Ok(u64::from(removed))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}

#[async_trait]
impl Counters for InMemoryStore {
    async fn incr(&self, key: &str) -> Result<i64, StoreError> {
        self.check_available()?;
        let mut counters = self.counters.write().await;
        let value = counters.entry(key.to_string()).or_insert(0);
        *value += 1;
        Ok(*value)
    }

    async fn expire(&self, key: &str, seconds: i64) -> Result<bool, StoreError> {
        SetStore::expire(self, key, seconds).await
    }
}
