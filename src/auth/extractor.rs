// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ElectroHub

//! Axum extractor for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{decode, Algorithm, Validation};

use super::{claims::Claims, AuthError, AuthenticatedUser};
use crate::state::{AppState, AuthConfig};

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Extractor for authenticated users.
///
/// Validates the JWT from the Authorization header and resolves the
/// caller's identity.
///
/// ## Authentication Modes
///
/// - **Production mode** (`TOKEN_SECRET` set): full HS256 signature
///   verification plus expiry and optional issuer checks
/// - **Development mode** (no secret): structure validation only
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeader)?;

        let user = verify_token(token, &state.auth)?;
        Ok(Auth(user))
    }
}

/// Verify a session token and extract the caller.
fn verify_token(token: &str, auth: &AuthConfig) -> Result<AuthenticatedUser, AuthError> {
    if let Some(ref key) = auth.decoding_key {
        verify_token_signed(token, key, auth.issuer.as_deref())
    } else {
        verify_token_development(token)
    }
}

fn verify_token_signed(
    token: &str,
    key: &jsonwebtoken::DecodingKey,
    issuer: Option<&str>,
) -> Result<AuthenticatedUser, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = CLOCK_SKEW_LEEWAY;
    validation.validate_aud = false;
    if let Some(issuer) = issuer {
        validation.set_issuer(&[issuer]);
    }

    let token_data = decode::<Claims>(token, key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => AuthError::InvalidIssuer,
        jsonwebtoken::errors::ErrorKind::ImmatureSignature => AuthError::TokenNotYetValid,
        _ => AuthError::MalformedToken,
    })?;

    Ok(AuthenticatedUser::from(token_data.claims))
}

/// Development verification (no signature check).
///
/// WARNING: only reachable when no `TOKEN_SECRET` is configured.
fn verify_token_development(token: &str) -> Result<AuthenticatedUser, AuthError> {
    let token_data = jsonwebtoken::dangerous::insecure_decode::<Claims>(token)
        .map_err(|_| AuthError::MalformedToken)?;

    let claims = token_data.claims;

    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64;

    if claims.exp > 0 && claims.exp < now - CLOCK_SKEW_LEEWAY as i64 {
        return Err(AuthError::TokenExpired);
    }

    Ok(AuthenticatedUser::from(claims))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use axum::http::Request;

    /// Helper to create an unsigned JWT (development mode only checks
    /// structure, so the signature segment can be anything).
    fn create_test_jwt(user_id: &str) -> String {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

        let header = r#"{"alg":"HS256","typ":"JWT"}"#;
        let claims = format!(
            r#"{{"sub":"{}","iat":1609459200,"exp":9999999999,"iss":"electrohub","sid":"sess_123"}}"#,
            user_id
        );

        let header_b64 = URL_SAFE_NO_PAD.encode(header.as_bytes());
        let claims_b64 = URL_SAFE_NO_PAD.encode(claims.as_bytes());

        format!("{}.{}.fake_signature", header_b64, claims_b64)
    }

    #[tokio::test]
    async fn auth_extractor_requires_auth_header() {
        let state = AppState::default();
        let mut parts = Request::builder()
            .uri("/test")
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingAuthHeader)));
    }

    #[tokio::test]
    async fn auth_extractor_rejects_non_bearer_scheme() {
        let state = AppState::default();
        let mut parts = Request::builder()
            .uri("/test")
            .header("Authorization", "Basic dXNlcjpwYXNz")
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidAuthHeader)));
    }

    #[tokio::test]
    async fn auth_extractor_resolves_user_in_dev_mode() {
        let state = AppState::default();
        let token = create_test_jwt("user_123");
        let mut parts = Request::builder()
            .uri("/test")
            .header("Authorization", format!("Bearer {}", token))
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let result = Auth::from_request_parts(&mut parts, &state).await;
        let Auth(user) = result.expect("token accepted");
        assert_eq!(user.user_id, "user_123");
        assert_eq!(user.session_id.as_deref(), Some("sess_123"));
    }

    #[tokio::test]
    async fn dev_mode_still_rejects_expired_tokens() {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

        let header_b64 = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let claims_b64 = URL_SAFE_NO_PAD
            .encode(br#"{"sub":"user_123","iat":1609459200,"exp":1609459201,"iss":"electrohub"}"#);
        let token = format!("{}.{}.sig", header_b64, claims_b64);

        let result = verify_token_development(&token);
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn signed_mode_rejects_bad_signature() {
        use jsonwebtoken::{encode, DecodingKey, EncodingKey, Header};

        let claims = serde_json::json!({
            "sub": "user_123",
            "iat": 1609459200,
            "exp": 9999999999_i64,
            "iss": "electrohub",
        });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"some-other-secret"),
        )
        .unwrap();

        let key = DecodingKey::from_secret(b"the-real-secret");
        let result = verify_token_signed(&token, &key, None);
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[test]
    fn signed_mode_accepts_valid_token_and_checks_issuer() {
        use jsonwebtoken::{encode, DecodingKey, EncodingKey, Header};

        let claims = serde_json::json!({
            "sub": "user_456",
            "iat": 1609459200,
            "exp": 9999999999_i64,
            "iss": "electrohub",
        });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"shared-secret"),
        )
        .unwrap();

        let key = DecodingKey::from_secret(b"shared-secret");
        let user = verify_token_signed(&token, &key, Some("electrohub")).expect("valid token");
        assert_eq!(user.user_id, "user_456");

        let result = verify_token_signed(&token, &key, Some("someone-else"));
        assert!(matches!(result, Err(AuthError::InvalidIssuer)));
    }
}
