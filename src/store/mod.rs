// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ElectroHub

//! # Key-Value Set Store Capability
//!
//! The wishlist keeps its membership truth in a shared, networked set store
//! (Redis in production). The service consumes it through the minimal
//! capability traits below rather than a concrete client, so handlers and
//! tests share one wiring:
//!
//! - [`SetStore`] - per-key set operations with expiration, used by the
//!   saved-items service.
//! - [`Counters`] - plain counter operations, used by the contact-seller
//!   rate limit and other windowed counters.
//!
//! Every operation is a single round trip. There is no retry or local
//! buffering here: if the store cannot be reached the operation fails with
//! [`StoreError::Unavailable`] and the caller decides what to surface. A
//! read failure is never reported as an empty result.

use std::collections::HashSet;

use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod redis;

pub use memory::InMemoryStore;
pub use redis::RedisStore;

/// Failure raised by the backing key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store cannot be reached or the round trip failed.
    #[error("key-value store unavailable: {0}")]
    Unavailable(String),
}

/// Per-key set operations with expiration.
///
/// Each primitive must be atomic with respect to concurrent callers on the
/// same key; the backing store provides that guarantee, not this layer.
#[async_trait]
pub trait SetStore: Send + Sync {
    /// Add `member` to the set at `key`. Returns the number of members
    /// newly added (0 or 1).
    async fn sadd(&self, key: &str, member: i64) -> Result<u64, StoreError>;

    /// Remove `member` from the set at `key`. Returns the number of members
    /// removed (0 or 1).
    async fn srem(&self, key: &str, member: i64) -> Result<u64, StoreError>;

    /// Full membership of the set at `key`. Empty set if the key is absent.
    async fn smembers(&self, key: &str) -> Result<HashSet<i64>, StoreError>;

    /// Whether `member` is in the set at `key`.
    async fn sismember(&self, key: &str, member: i64) -> Result<bool, StoreError>;

    /// Cardinality of the set at `key`. 0 if the key is absent.
    async fn scard(&self, key: &str) -> Result<u64, StoreError>;

    /// Arm a TTL on `key`. Returns whether a timeout was set.
    async fn expire(&self, key: &str, seconds: i64) -> Result<bool, StoreError>;

    /// Delete `key`. Returns the number of keys removed (0 or 1).
    async fn del(&self, key: &str) -> Result<u64, StoreError>;

    /// Round-trip reachability probe, used by readiness checks.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Windowed counter operations.
#[async_trait]
pub trait Counters: Send + Sync {
    /// Increment the integer at `key` by one, creating it at 1 if absent.
    /// Returns the post-increment value.
    async fn incr(&self, key: &str) -> Result<i64, StoreError>;

    /// Arm a TTL on `key`. Returns whether a timeout was set.
    async fn expire(&self, key: &str, seconds: i64) -> Result<bool, StoreError>;
}
