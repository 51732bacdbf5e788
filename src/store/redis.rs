// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ElectroHub

//! Redis implementation of the set-store and counter capabilities.
//!
//! Uses a [`ConnectionManager`] so the client reconnects transparently and
//! can be cloned cheaply into handlers. The manager is constructed once at
//! process start ([`connect`]) and injected through `AppState`; there is no
//! lazy global client.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use redis::{
    aio::{ConnectionManager, ConnectionManagerConfig},
    AsyncCommands, Client,
};

use super::{Counters, SetStore, StoreError};

/// How long a connect attempt may take before the manager gives up.
const CONNECT_TIMEOUT: Duration = Duration::from_millis(500);

/// Open a managed connection to the Redis instance at `url`.
///
/// A single reconnect attempt is configured; beyond that, operations fail
/// with [`StoreError::Unavailable`] and propagate to the caller.
pub async fn connect(url: &str) -> Result<ConnectionManager, StoreError> {
    let config = ConnectionManagerConfig::new()
        .set_number_of_retries(1)
        .set_connection_timeout(CONNECT_TIMEOUT);

    let client = Client::open(url).map_err(|e| StoreError::Unavailable(e.to_string()))?;
    client
        .get_connection_manager_with_config(config)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))
}

/// Set-store and counter capabilities over a shared Redis connection.
#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
}

impl RedisStore {
    pub fn new(connection: ConnectionManager) -> Self {
        Self { connection }
    }
}

fn unavailable(err: redis::RedisError) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

#[async_trait]
impl SetStore for RedisStore {
    async fn sadd(&self, key: &str, member: i64) -> Result<u64, StoreError> {
        let mut conn = self.connection.clone();
        conn.sadd(key, member).await.map_err(unavailable)
    }

    async fn srem(&self, key: &str, member: i64) -> Result<u64, StoreError> {
        let mut conn = self.connection.clone();
        conn.srem(key, member).await.map_err(unavailable)
    }

    async fn smembers(&self, key: &str) -> Result<HashSet<i64>, StoreError> {
        let mut conn = self.connection.clone();
        conn.smembers(key).await.map_err(unavailable)
    }

    async fn sismember(&self, key: &str, member: i64) -> Result<bool, StoreError> {
        let mut conn = self.connection.clone();
        conn.sismember(key, member).await.map_err(unavailable)
    }

    async fn scard(&self, key: &str) -> Result<u64, StoreError> {
        let mut conn = self.connection.clone();
        conn.scard(key).await.map_err(unavailable)
    }

    async fn expire(&self, key: &str, seconds: i64) -> Result<bool, StoreError> {
        let mut conn = self.connection.clone();
        conn.expire(key, seconds).await.map_err(unavailable)
    }

    async fn del(&self, key: &str) -> Result<u64, StoreError> {
        let mut conn = self.connection.clone();
        conn.del(key).await.map_err(unavailable)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();
        redis::cmd("PING")
            .query_async::<()>(&mut conn)
            .await
            .map_err(unavailable)
    }
}

#[async_trait]
impl Counters for RedisStore {
    async fn incr(&self, key: &str) -> Result<i64, StoreError> {
        let mut conn = self.connection.clone();
        conn.incr(key, 1_i64).await.map_err(unavailable)
    }

    async fn expire(&self, key: &str, seconds: i64) -> Result<bool, StoreError> {
        let mut conn = self.connection.clone();
        conn.expire(key, seconds).await.map_err(unavailable)
    }
}
