// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ElectroHub

//! # Relational Catalog Capability
//!
//! The durable store of listings and accounts. The catalog is authoritative
//! for listing existence and metadata; the wishlist never consults it for
//! membership truth. It is consumed here only at its interface boundary:
//! existence checks before a save, enrichment when listing saved items, the
//! denormalized `saves_count` counter, and seller/account lookups for
//! contact-seller.
//!
//! There is no foreign key between the wishlist store and the catalog, so a
//! saved item may reference a row that has since been deactivated or
//! deleted. Enrichment tolerates that by simply omitting missing rows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

pub mod db;
pub mod listing;
pub mod memory;
pub mod user_account;

pub use db::DbCatalog;
pub use memory::InMemoryCatalog;

/// Failure raised by the relational catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog query failed: {0}")]
    Db(String),
}

/// Display-ready listing record used to enrich wishlist ids.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ListingSummary {
    pub item_id: i64,
    pub title: String,
    pub price: f64,
    pub city: String,
    pub state: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

/// Seller coordinates for a listing, resolved for contact-seller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSeller {
    pub seller_id: String,
    pub item_title: String,
    pub email: String,
    pub name: String,
}

/// A registered account, as the catalog knows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub user_id: String,
    pub email: String,
    pub name: String,
}

#[async_trait]
pub trait Catalog: Send + Sync {
    /// Whether `item_id` references an active listing.
    async fn active_listing_exists(&self, item_id: i64) -> Result<bool, CatalogError>;

    /// Listings for the given ids, newest first, with skip/limit applied on
    /// the catalog side. Ids without a catalog row are omitted.
    async fn listings_by_ids(
        &self,
        ids: &[i64],
        skip: u64,
        limit: u64,
    ) -> Result<Vec<ListingSummary>, CatalogError>;

    /// Apply `delta` to the listing's denormalized saves counter, clamped at
    /// zero. This is a plain read-modify-write invoked by the route layer
    /// after the wishlist mutation; the two are not atomic and the counter
    /// may drift from the true set cardinality.
    async fn adjust_saves_count(&self, item_id: i64, delta: i64) -> Result<(), CatalogError>;

    /// Seller coordinates for an active listing, if both the listing and
    /// the seller account exist.
    async fn listing_seller(&self, item_id: i64) -> Result<Option<ListingSeller>, CatalogError>;

    /// Look up a registered account by its stable user id.
    async fn user_account(&self, user_id: &str) -> Result<Option<UserAccount>, CatalogError>;

    /// Connectivity probe, used by readiness checks.
    async fn ping(&self) -> Result<(), CatalogError>;
}
