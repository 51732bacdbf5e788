// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ElectroHub

//! `marketplace_items` entity: durable listing records plus the
//! denormalized `saves_count` counter.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "marketplace_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub item_id: i64,
    pub seller_id: String,
    pub title: String,
    pub price: f64,
    pub city: String,
    pub state: String,
    pub category: String,
    pub is_active: bool,
    pub saves_count: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
