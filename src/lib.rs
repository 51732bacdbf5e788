// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ElectroHub

//! ElectroHub Saved Items - Marketplace Wishlist Service
//!
//! This crate provides the saved-items (wishlist) backend for the
//! ElectroHub classifieds marketplace. Wishlist membership lives in a
//! Redis-backed key-value set store with a rolling 30-day TTL per user;
//! listing metadata is joined in from the relational catalog at read time.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Session token verification (HS256 JWT)
//! - `wishlist` - Saved-items set semantics over the key-value store
//! - `store` - Key-value set store capability (Redis / in-memory)
//! - `catalog` - Relational listing and account lookups (SeaORM / Postgres)
//! - `mailer` - Contact-seller mail relay

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod mailer;
pub mod models;
pub mod state;
pub mod store;
pub mod wishlist;
