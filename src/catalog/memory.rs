// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ElectroHub

//! In-memory catalog for tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Catalog, CatalogError, ListingSeller, ListingSummary, UserAccount};

struct StoredListing {
    summary: ListingSummary,
    seller_id: String,
    is_active: bool,
    saves_count: i64,
}

#[derive(Default)]
pub struct InMemoryCatalog {
    listings: RwLock<HashMap<i64, StoredListing>>,
    accounts: RwLock<HashMap<String, UserAccount>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_listing(&self, summary: ListingSummary, seller_id: &str, is_active: bool) {
        self.listings.write().await.insert(
            summary.item_id,
            StoredListing {
                summary,
                seller_id: seller_id.to_string(),
                is_active,
                saves_count: 0,
            },
        );
    }

    pub async fn insert_account(&self, account: UserAccount) {
        self.accounts
            .write()
            .await
            .insert(account.user_id.clone(), account);
    }

    /// Drop a listing row entirely, leaving wishlist entries dangling.
    pub async fn remove_listing(&self, item_id: i64) {
        self.listings.write().await.remove(&item_id);
    }

    /// Current counter value, for asserting the non-atomic counter path.
    pub async fn saves_count(&self, item_id: i64) -> Option<i64> {
        self.listings
            .read()
            .await
            .get(&item_id)
            .map(|stored| stored.saves_count)
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn active_listing_exists(&self, item_id: i64) -> Result<bool, CatalogError> {
        Ok(self
            .listings
            .read()
            .await
            .get(&item_id)
            .is_some_and(|stored| stored.is_active))
    }

    async fn listings_by_ids(
        &self,
        ids: &[i64],
        skip: u64,
        limit: u64,
    ) -> Result<Vec<ListingSummary>, CatalogError> {
        let listings = self.listings.read().await;
        let mut rows: Vec<ListingSummary> = ids
            .iter()
            .filter_map(|id| listings.get(id))
            .map(|stored| stored.summary.clone())
            .collect();

        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn adjust_saves_count(&self, item_id: i64, delta: i64) -> Result<(), CatalogError> {
        if let Some(stored) = self.listings.write().await.get_mut(&item_id) {
            stored.saves_count = (stored.saves_count + delta).max(0);
        }
        Ok(())
    }

    async fn listing_seller(&self, item_id: i64) -> Result<Option<ListingSeller>, CatalogError> {
        let listings = self.listings.read().await;
        let Some(stored) = listings.get(&item_id).filter(|stored| stored.is_active) else {
            return Ok(None);
        };

        let accounts = self.accounts.read().await;
        Ok(accounts.get(&stored.seller_id).map(|seller| ListingSeller {
            seller_id: seller.user_id.clone(),
            item_title: stored.summary.title.clone(),
            email: seller.email.clone(),
            name: seller.name.clone(),
        }))
    }

    async fn user_account(&self, user_id: &str) -> Result<Option<UserAccount>, CatalogError> {
        Ok(self.accounts.read().await.get(user_id).cloned())
    }

    async fn ping(&self) -> Result<(), CatalogError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn summary(item_id: i64, day: u32) -> ListingSummary {
        ListingSummary {
            item_id,
            title: format!("Listing {item_id}"),
            price: 25.0,
            city: "Denver".into(),
            state: "CO".into(),
            category: "electronics".into(),
            created_at: Utc.with_ymd_and_hms(2026, 8, day, 12, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn listings_by_ids_orders_newest_first_and_paginates() {
        let catalog = InMemoryCatalog::new();
        catalog.insert_listing(summary(1, 1), "seller", true).await;
        catalog.insert_listing(summary(2, 3), "seller", true).await;
        catalog.insert_listing(summary(3, 2), "seller", true).await;

        let page = catalog.listings_by_ids(&[1, 2, 3], 0, 2).await.unwrap();
        assert_eq!(
            page.iter().map(|l| l.item_id).collect::<Vec<_>>(),
            vec![2, 3]
        );

        let rest = catalog.listings_by_ids(&[1, 2, 3], 2, 2).await.unwrap();
        assert_eq!(rest.iter().map(|l| l.item_id).collect::<Vec<_>>(), vec![1]);
    }

    #[tokio::test]
    async fn enrichment_omits_missing_rows() {
        let catalog = InMemoryCatalog::new();
        catalog.insert_listing(summary(1, 1), "seller", true).await;

        // Id 42 has no catalog row; the dangling wishlist entry is omitted.
        let page = catalog.listings_by_ids(&[1, 42], 0, 20).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].item_id, 1);
    }

    #[tokio::test]
    async fn saves_count_clamps_at_zero() {
        let catalog = InMemoryCatalog::new();
        catalog.insert_listing(summary(1, 1), "seller", true).await;

        catalog.adjust_saves_count(1, -1).await.unwrap();
        assert_eq!(catalog.saves_count(1).await, Some(0));

        catalog.adjust_saves_count(1, 1).await.unwrap();
        assert_eq!(catalog.saves_count(1).await, Some(1));
    }

    #[tokio::test]
    async fn inactive_listing_does_not_exist_and_has_no_seller() {
        let catalog = InMemoryCatalog::new();
        catalog.insert_listing(summary(9, 1), "seller", false).await;
        catalog
            .insert_account(UserAccount {
                user_id: "seller".into(),
                email: "seller@example.com".into(),
                name: "Seller".into(),
            })
            .await;

        assert!(!catalog.active_listing_exists(9).await.unwrap());
        assert!(catalog.listing_seller(9).await.unwrap().is_none());
    }
}
