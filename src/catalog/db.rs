// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ElectroHub

//! Postgres-backed catalog over a shared sea-orm [`DatabaseConnection`].

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use super::{
    listing, user_account, Catalog, CatalogError, ListingSeller, ListingSummary, UserAccount,
};

#[derive(Clone)]
pub struct DbCatalog {
    db: DatabaseConnection,
}

impl DbCatalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_err(err: sea_orm::DbErr) -> CatalogError {
    CatalogError::Db(err.to_string())
}

impl From<listing::Model> for ListingSummary {
    fn from(model: listing::Model) -> Self {
        Self {
            item_id: model.item_id,
            title: model.title,
            price: model.price,
            city: model.city,
            state: model.state,
            category: model.category,
            created_at: model.created_at,
        }
    }
}

#[async_trait]
impl Catalog for DbCatalog {
    async fn active_listing_exists(&self, item_id: i64) -> Result<bool, CatalogError> {
        let found = listing::Entity::find_by_id(item_id)
            .filter(listing::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.is_some())
    }

    async fn listings_by_ids(
        &self,
        ids: &[i64],
        skip: u64,
        limit: u64,
    ) -> Result<Vec<ListingSummary>, CatalogError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = listing::Entity::find()
            .filter(listing::Column::ItemId.is_in(ids.iter().copied()))
            .order_by_desc(listing::Column::CreatedAt)
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows.into_iter().map(ListingSummary::from).collect())
    }

    async fn adjust_saves_count(&self, item_id: i64, delta: i64) -> Result<(), CatalogError> {
        // Read-modify-write, not atomic with the wishlist mutation. The
        // counter may drift from the true set cardinality; that drift is
        // accepted.
        let Some(model) = listing::Entity::find_by_id(item_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(());
        };

        let next = (model.saves_count + delta).max(0);
        let mut active: listing::ActiveModel = model.into();
        active.saves_count = Set(next);
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn listing_seller(&self, item_id: i64) -> Result<Option<ListingSeller>, CatalogError> {
        let Some(item) = listing::Entity::find_by_id(item_id)
            .filter(listing::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let Some(seller) = user_account::Entity::find()
            .filter(user_account::Column::UserId.eq(&item.seller_id))
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        Ok(Some(ListingSeller {
            seller_id: item.seller_id,
            item_title: item.title,
            email: seller.email,
            name: seller.name,
        }))
    }

    async fn user_account(&self, user_id: &str) -> Result<Option<UserAccount>, CatalogError> {
        let found = user_account::Entity::find()
            .filter(user_account::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(found.map(|account| UserAccount {
            user_id: account.user_id,
            email: account.email,
            name: account.name,
        }))
    }

    async fn ping(&self) -> Result<(), CatalogError> {
        self.db.ping().await.map_err(db_err)
    }
}
