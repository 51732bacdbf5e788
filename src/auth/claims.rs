// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ElectroHub

//! JWT claims and authenticated user representation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims carried by an ElectroHub session token.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    /// Subject - the canonical user identifier.
    pub sub: String,

    /// Issued-at timestamp.
    #[serde(default)]
    #[allow(dead_code)]
    pub iat: i64,

    /// Expiration timestamp.
    #[serde(default)]
    pub exp: i64,

    /// Issuer.
    #[serde(default)]
    pub iss: String,

    /// Session id, if the issuer attaches one.
    #[serde(default)]
    pub sid: Option<String>,
}

/// Authenticated caller extracted from a verified token.
///
/// This is the type handlers receive; `user_id` is the opaque stable string
/// the wishlist keys sets by.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Canonical user id (token `sub` claim).
    pub user_id: String,

    /// Session id, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Original issuer (kept for logging, not serialized).
    #[serde(skip)]
    pub issuer: String,

    /// Token expiration as a Unix timestamp (not serialized).
    #[serde(skip)]
    pub expires_at: i64,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            session_id: claims.sid,
            issuer: claims.iss,
            expires_at: claims.exp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_is_built_from_claims() {
        let claims = Claims {
            sub: "user_123".to_string(),
            iat: 1700000000,
            exp: 1700003600,
            iss: "electrohub".to_string(),
            sid: Some("sess_abc".to_string()),
        };

        let user = AuthenticatedUser::from(claims);
        assert_eq!(user.user_id, "user_123");
        assert_eq!(user.session_id.as_deref(), Some("sess_abc"));
        assert_eq!(user.issuer, "electrohub");
        assert_eq!(user.expires_at, 1700003600);
    }
}
