// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ElectroHub

//! Outbound mail capability for contact-seller messages.
//!
//! Delivery is an external concern; the route layer only needs "send this
//! message or tell me it failed". [`HttpMailer`] posts to a mail relay
//! endpoint; [`NullMailer`] logs and succeeds, for environments without a
//! relay and for tests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("mail relay request failed: {0}")]
    Request(String),

    #[error("mail relay rejected the message: {0}")]
    Rejected(String),
}

/// A contact-seller message ready for delivery.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ContactEmail {
    pub from_email: String,
    pub from_name: String,
    pub to_email: String,
    pub subject: String,
    pub body: String,
    pub item_title: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_contact_email(&self, email: &ContactEmail) -> Result<(), MailerError>;
}

/// Posts messages as JSON to a mail relay endpoint.
pub struct HttpMailer {
    client: Client,
    endpoint: String,
}

impl HttpMailer {
    pub fn new(endpoint: String) -> Self {
        let client = Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client, endpoint }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send_contact_email(&self, email: &ContactEmail) -> Result<(), MailerError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(email)
            .send()
            .await
            .map_err(|e| MailerError::Request(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(MailerError::Rejected(format!(
                "relay returned {}",
                response.status()
            )))
        }
    }
}

/// Logs the message and reports success. Used when no relay is configured.
#[derive(Default)]
pub struct NullMailer;

#[async_trait]
impl Mailer for NullMailer {
    async fn send_contact_email(&self, email: &ContactEmail) -> Result<(), MailerError> {
        info!(
            to = %email.to_email,
            subject = %email.subject,
            item = %email.item_title,
            "mail relay not configured; dropping contact email"
        );
        Ok(())
    }
}
