// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ElectroHub

//! Contact-seller route.
//!
//! A buyer messages the seller of a listing. The message is validated,
//! counted against a per-user, per-listing daily quota in the key-value
//! store, then relayed by the configured mailer. The quota key is
//! `contact:{user_id}:{item_id}:{YYYY-MM-DD}` with a 24h TTL armed on the
//! first message of the day.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use tracing::{info, warn};

use crate::{
    auth::Auth,
    error::ApiError,
    mailer::ContactEmail,
    models::{ContactSellerRequest, ContactSellerResponse},
    state::AppState,
};

const MIN_SUBJECT_CHARS: usize = 5;
const MIN_MESSAGE_CHARS: usize = 20;
const CONTACT_WINDOW_SECS: i64 = 24 * 60 * 60;

/// Send a message to the seller of a listing.
///
/// Quota is consumed before the seller lookup, so probing nonexistent
/// listings still counts against the caller's daily allowance.
#[utoipa::path(
    post,
    path = "/api/listings/{item_id}/contact-seller",
    params(("item_id" = i64, Path, description = "Listing id")),
    request_body = ContactSellerRequest,
    tag = "Contact",
    responses(
        (status = 200, body = ContactSellerResponse),
        (status = 400, description = "Subject or message too short"),
        (status = 401, description = "Caller has no user account"),
        (status = 404, description = "Listing or seller not found"),
        (status = 429, description = "Daily contact limit reached"),
        (status = 503, description = "Key-value store unavailable")
    )
)]
pub async fn contact_seller(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(item_id): Path<i64>,
    Json(request): Json<ContactSellerRequest>,
) -> Result<Json<ContactSellerResponse>, ApiError> {
    if request.subject.trim().chars().count() < MIN_SUBJECT_CHARS {
        return Err(ApiError::bad_request(format!(
            "Subject must be at least {MIN_SUBJECT_CHARS} characters"
        )));
    }
    if request.message.trim().chars().count() < MIN_MESSAGE_CHARS {
        return Err(ApiError::bad_request(format!(
            "Message must be at least {MIN_MESSAGE_CHARS} characters"
        )));
    }

    let window = Utc::now().format("%Y-%m-%d");
    let quota_key = format!("contact:{}:{}:{}", user.user_id, item_id, window);
    let sent_today = state.counters.incr(&quota_key).await?;
    if sent_today == 1 {
        let armed = state.counters.expire(&quota_key, CONTACT_WINDOW_SECS).await?;
        if !armed {
            warn!(key = %quota_key, "contact quota key vanished before TTL arm");
        }
    }
    if sent_today > state.contact_daily_limit {
        return Err(ApiError::too_many_requests(format!(
            "Daily contact limit of {} messages reached for this listing",
            state.contact_daily_limit
        )));
    }

    let buyer = state
        .catalog
        .user_account(&user.user_id)
        .await?
        .ok_or_else(|| {
            ApiError::new(
                axum::http::StatusCode::UNAUTHORIZED,
                "No account found for caller",
            )
        })?;

    let seller = state
        .catalog
        .listing_seller(item_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Listing not found"))?;

    state
        .mailer
        .send_contact_email(&ContactEmail {
            from_email: buyer.email,
            from_name: buyer.name,
            to_email: seller.email,
            subject: request.subject.trim().to_string(),
            body: request.message.trim().to_string(),
            item_title: seller.item_title,
        })
        .await?;

    info!(
        user_id = %user.user_id,
        item_id,
        seller_id = %seller.seller_id,
        "contact email relayed"
    );

    Ok(Json(ContactSellerResponse {
        success: true,
        message: "Message sent to seller".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthenticatedUser;
    use crate::catalog::{InMemoryCatalog, ListingSummary, UserAccount};
    use crate::mailer::{Mailer, MailerError};
    use crate::store::InMemoryStore;
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    /// Captures outbound mail for assertions.
    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<ContactEmail>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send_contact_email(&self, email: &ContactEmail) -> Result<(), MailerError> {
            self.sent.lock().await.push(email.clone());
            Ok(())
        }
    }

    struct FailingMailer;

    #[async_trait]
    impl Mailer for FailingMailer {
        async fn send_contact_email(&self, _email: &ContactEmail) -> Result<(), MailerError> {
            Err(MailerError::Rejected("relay returned 502".into()))
        }
    }

    async fn seeded_state(mailer: Arc<dyn Mailer>) -> (AppState, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let catalog = Arc::new(InMemoryCatalog::new());

        catalog
            .insert_listing(
                ListingSummary {
                    item_id: 7,
                    title: "Open-box soundbar".into(),
                    price: 120.0,
                    city: "Austin".into(),
                    state: "TX".into(),
                    category: "electronics".into(),
                    created_at: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
                },
                "seller_1",
                true,
            )
            .await;
        catalog
            .insert_account(UserAccount {
                user_id: "seller_1".into(),
                email: "seller@example.com".into(),
                name: "Sam Seller".into(),
            })
            .await;
        catalog
            .insert_account(UserAccount {
                user_id: "buyer_1".into(),
                email: "buyer@example.com".into(),
                name: "Blake Buyer".into(),
            })
            .await;

        let state = AppState::new(store.clone(), store.clone(), catalog, mailer);
        (state, store)
    }

    fn caller(user_id: &str) -> Auth {
        Auth(AuthenticatedUser {
            user_id: user_id.to_string(),
            session_id: None,
            issuer: "test".to_string(),
            expires_at: 0,
        })
    }

    fn valid_request() -> ContactSellerRequest {
        ContactSellerRequest {
            subject: "Is this still available?".into(),
            message: "Hi, I am interested in the soundbar. Does it come with the remote?".into(),
        }
    }

    #[tokio::test]
    async fn relays_message_with_buyer_and_seller_resolved() {
        let mailer = Arc::new(RecordingMailer::default());
        let (state, store) = seeded_state(mailer.clone()).await;

        let Json(body) = contact_seller(
            State(state),
            caller("buyer_1"),
            Path(7),
            Json(valid_request()),
        )
        .await
        .unwrap();
        assert!(body.success);

        let sent = mailer.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].from_email, "buyer@example.com");
        assert_eq!(sent[0].from_name, "Blake Buyer");
        assert_eq!(sent[0].to_email, "seller@example.com");
        assert_eq!(sent[0].item_title, "Open-box soundbar");

        // First message of the day arms the 24h quota window.
        let window = Utc::now().format("%Y-%m-%d");
        let key = format!("contact:buyer_1:7:{window}");
        assert_eq!(store.armed_ttl(&key).await, Some(24 * 60 * 60));
    }

    #[tokio::test]
    async fn rejects_short_subject_and_message() {
        let mailer = Arc::new(RecordingMailer::default());
        let (state, _) = seeded_state(mailer.clone()).await;

        let err = contact_seller(
            State(state.clone()),
            caller("buyer_1"),
            Path(7),
            Json(ContactSellerRequest {
                subject: "Hi".into(),
                message: valid_request().message,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err = contact_seller(
            State(state),
            caller("buyer_1"),
            Path(7),
            Json(ContactSellerRequest {
                subject: valid_request().subject,
                message: "Too short".into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        assert!(mailer.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn unknown_listing_is_404_and_still_consumes_quota() {
        let mailer = Arc::new(RecordingMailer::default());
        let (state, store) = seeded_state(mailer).await;

        let err = contact_seller(
            State(state),
            caller("buyer_1"),
            Path(999),
            Json(valid_request()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let window = Utc::now().format("%Y-%m-%d");
        let key = format!("contact:buyer_1:999:{window}");
        assert_eq!(store.armed_ttl(&key).await, Some(24 * 60 * 60));
    }

    #[tokio::test]
    async fn caller_without_account_is_401() {
        let mailer = Arc::new(RecordingMailer::default());
        let (state, _) = seeded_state(mailer).await;

        let err = contact_seller(
            State(state),
            caller("ghost"),
            Path(7),
            Json(valid_request()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn daily_limit_is_per_user_per_listing() {
        let mailer = Arc::new(RecordingMailer::default());
        let (state, _) = seeded_state(mailer.clone()).await;
        let state = state.with_contact_daily_limit(2);

        for _ in 0..2 {
            contact_seller(
                State(state.clone()),
                caller("buyer_1"),
                Path(7),
                Json(valid_request()),
            )
            .await
            .unwrap();
        }

        let err = contact_seller(
            State(state),
            caller("buyer_1"),
            Path(7),
            Json(valid_request()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(mailer.sent.lock().await.len(), 2);
    }

    #[tokio::test]
    async fn relay_failure_surfaces_as_500() {
        let (state, _) = seeded_state(Arc::new(FailingMailer)).await;

        let err = contact_seller(
            State(state),
            caller("buyer_1"),
            Path(7),
            Json(valid_request()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
