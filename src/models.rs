// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ElectroHub

//! # API Data Models
//!
//! Request and response structures for the REST API. All types derive
//! `Serialize`/`Deserialize` and `ToSchema` for JSON handling and OpenAPI
//! documentation.
//!
//! ## Model Categories
//!
//! - **Saved items**: wishlist mutation results, the enriched saved-items
//!   page, count and membership lookups
//! - **Contact seller**: the inbound message and its outcome

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::catalog::ListingSummary;

// =============================================================================
// Saved Items
// =============================================================================

/// Identifies the listing a save/unsave call targets.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SaveItemQuery {
    /// Listing id in the relational catalog.
    pub item_id: i64,
}

/// Pagination window for the enriched saved-items page.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Rows to skip, applied after newest-first ordering.
    #[serde(default)]
    pub skip: u64,
    /// Maximum rows to return.
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    20
}

/// Outcome of a save or unsave call. Saving an already-saved item and
/// unsaving an absent one are ordinary responses, distinguished by the flag.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SaveResponse {
    /// Whether the wishlist actually changed.
    pub changed: bool,
    pub message: String,
}

/// Enriched, paginated view of a user's wishlist.
///
/// `total` is the wishlist cardinality; `items` carries only the current
/// page, joined against the catalog and ordered newest first. Saved ids
/// whose listing has vanished from the catalog are omitted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SavedItemsPage {
    pub total: u64,
    pub items: Vec<ListingSummary>,
    pub skip: u64,
    pub limit: u64,
}

/// Membership lookup result for a single listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct IsSavedResponse {
    pub is_saved: bool,
}

/// Wishlist cardinality.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SavedCountResponse {
    pub count: u64,
}

/// Outcome of clearing the wishlist.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ClearResponse {
    /// Whether a wishlist existed to remove.
    pub cleared: bool,
}

// =============================================================================
// Contact Seller
// =============================================================================

/// Message a buyer sends about a listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactSellerRequest {
    /// Subject line, 5 characters minimum.
    pub subject: String,
    /// Message body, 20 characters minimum.
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ContactSellerResponse {
    pub success: bool,
    pub message: String,
}
