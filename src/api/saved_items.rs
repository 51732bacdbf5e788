// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ElectroHub

//! Saved-items (wishlist) routes.
//!
//! Each route maps to one saved-items service call. This layer owns what
//! the service deliberately does not: resolving the caller from the bearer
//! token, validating listing existence before a save, enriching and
//! paginating the listing page through the catalog, and the best-effort
//! `saves_count` counter updates.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::{info, warn};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{
        ClearResponse, IsSavedResponse, PageQuery, SaveItemQuery, SaveResponse,
        SavedCountResponse, SavedItemsPage,
    },
    state::AppState,
};

/// Save a listing to the caller's wishlist.
///
/// The listing must exist and be active; membership itself is then purely a
/// wishlist-store operation. Saving an already-saved item is an ordinary
/// response with `changed: false`.
#[utoipa::path(
    post,
    path = "/api/users/saved-items",
    params(SaveItemQuery),
    tag = "Saved Items",
    responses(
        (status = 200, body = SaveResponse),
        (status = 404, description = "Listing not found or inactive"),
        (status = 503, description = "Wishlist store unavailable")
    )
)]
pub async fn save_item(
    State(state): State<AppState>,
    Auth(user): Auth,
    Query(query): Query<SaveItemQuery>,
) -> Result<Json<SaveResponse>, ApiError> {
    if !state.catalog.active_listing_exists(query.item_id).await? {
        return Err(ApiError::not_found("Listing not found"));
    }

    let changed = state.saved_items.save(&user.user_id, query.item_id).await?;

    if changed {
        // Separate round trip, not atomic with the set mutation; the
        // counter may drift and that is accepted.
        if let Err(err) = state.catalog.adjust_saves_count(query.item_id, 1).await {
            warn!(item_id = query.item_id, error = %err, "saves_count increment failed");
        }
        info!(user_id = %user.user_id, item_id = query.item_id, "item saved");
    }

    Ok(Json(SaveResponse {
        changed,
        message: if changed {
            "Item saved to wishlist".to_string()
        } else {
            "Already saved".to_string()
        },
    }))
}

/// Remove a listing from the caller's wishlist.
#[utoipa::path(
    delete,
    path = "/api/users/saved-items",
    params(SaveItemQuery),
    tag = "Saved Items",
    responses(
        (status = 200, body = SaveResponse),
        (status = 503, description = "Wishlist store unavailable")
    )
)]
pub async fn unsave_item(
    State(state): State<AppState>,
    Auth(user): Auth,
    Query(query): Query<SaveItemQuery>,
) -> Result<Json<SaveResponse>, ApiError> {
    let changed = state
        .saved_items
        .unsave(&user.user_id, query.item_id)
        .await?;

    if changed {
        if let Err(err) = state.catalog.adjust_saves_count(query.item_id, -1).await {
            warn!(item_id = query.item_id, error = %err, "saves_count decrement failed");
        }
        info!(user_id = %user.user_id, item_id = query.item_id, "item unsaved");
    }

    Ok(Json(SaveResponse {
        changed,
        message: if changed {
            "Removed from saved".to_string()
        } else {
            "Not saved".to_string()
        },
    }))
}

/// The caller's wishlist, enriched with listing metadata.
///
/// The wishlist store has no ordering; the catalog supplies newest-first
/// ordering and the skip/limit window. `total` counts wishlist membership,
/// so a saved id whose listing has since vanished still counts but carries
/// no row in `items`.
#[utoipa::path(
    get,
    path = "/api/users/saved-items",
    params(PageQuery),
    tag = "Saved Items",
    responses(
        (status = 200, body = SavedItemsPage),
        (status = 503, description = "Wishlist store unavailable")
    )
)]
pub async fn list_saved_items(
    State(state): State<AppState>,
    Auth(user): Auth,
    Query(page): Query<PageQuery>,
) -> Result<Json<SavedItemsPage>, ApiError> {
    let ids: Vec<i64> = state
        .saved_items
        .list_saved(&user.user_id)
        .await?
        .into_iter()
        .collect();

    let items = state
        .catalog
        .listings_by_ids(&ids, page.skip, page.limit)
        .await?;

    Ok(Json(SavedItemsPage {
        total: ids.len() as u64,
        items,
        skip: page.skip,
        limit: page.limit,
    }))
}

/// Wishlist cardinality for the caller.
#[utoipa::path(
    get,
    path = "/api/users/saved-items/count",
    tag = "Saved Items",
    responses(
        (status = 200, body = SavedCountResponse),
        (status = 503, description = "Wishlist store unavailable")
    )
)]
pub async fn saved_items_count(
    State(state): State<AppState>,
    Auth(user): Auth,
) -> Result<Json<SavedCountResponse>, ApiError> {
    let count = state.saved_items.count_saved(&user.user_id).await?;
    Ok(Json(SavedCountResponse { count }))
}

/// Whether the caller has saved a given listing.
#[utoipa::path(
    get,
    path = "/api/listings/{item_id}/is-saved",
    params(("item_id" = i64, Path, description = "Listing id")),
    tag = "Saved Items",
    responses(
        (status = 200, body = IsSavedResponse),
        (status = 503, description = "Wishlist store unavailable")
    )
)]
pub async fn is_item_saved(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(item_id): Path<i64>,
) -> Result<Json<IsSavedResponse>, ApiError> {
    let is_saved = state.saved_items.is_saved(&user.user_id, item_id).await?;
    Ok(Json(IsSavedResponse { is_saved }))
}

/// Drop the caller's entire wishlist.
#[utoipa::path(
    delete,
    path = "/api/users/saved-items/all",
    tag = "Saved Items",
    responses(
        (status = 200, body = ClearResponse),
        (status = 503, description = "Wishlist store unavailable")
    )
)]
pub async fn clear_saved_items(
    State(state): State<AppState>,
    Auth(user): Auth,
) -> Result<Json<ClearResponse>, ApiError> {
    let cleared = state.saved_items.clear_saved(&user.user_id).await?;
    if cleared {
        info!(user_id = %user.user_id, "wishlist cleared");
    }
    Ok(Json(ClearResponse { cleared }))
}
