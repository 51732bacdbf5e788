// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ElectroHub

//! # HTTP API
//!
//! Route handlers and router assembly. Interactive OpenAPI documentation is
//! served at `/docs`.

pub mod contact;
pub mod health;
pub mod saved_items;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        saved_items::save_item,
        saved_items::unsave_item,
        saved_items::list_saved_items,
        saved_items::saved_items_count,
        saved_items::is_item_saved,
        saved_items::clear_saved_items,
        contact::contact_seller,
        health::health,
        health::liveness,
        health::readiness,
    ),
    components(schemas(
        crate::models::SaveResponse,
        crate::models::SavedItemsPage,
        crate::models::IsSavedResponse,
        crate::models::SavedCountResponse,
        crate::models::ClearResponse,
        crate::models::ContactSellerRequest,
        crate::models::ContactSellerResponse,
        crate::catalog::ListingSummary,
        crate::auth::AuthenticatedUser,
        health::ReadyResponse,
        health::HealthChecks,
        health::HealthResponse,
    )),
    tags(
        (name = "Saved Items", description = "Per-user wishlist over the key-value set store"),
        (name = "Contact", description = "Buyer-to-seller messaging"),
        (name = "Health", description = "Liveness and readiness probes"),
    )
)]
pub struct ApiDoc;

/// Build the application router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/users/saved-items",
            post(saved_items::save_item)
                .delete(saved_items::unsave_item)
                .get(saved_items::list_saved_items),
        )
        .route(
            "/users/saved-items/count",
            get(saved_items::saved_items_count),
        )
        .route(
            "/users/saved-items/all",
            delete(saved_items::clear_saved_items),
        )
        .route("/listings/{item_id}/is-saved", get(saved_items::is_item_saved))
        .route(
            "/listings/{item_id}/contact-seller",
            post(contact::contact_seller),
        );

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
