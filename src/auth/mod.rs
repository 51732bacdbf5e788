// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ElectroHub

//! # Authentication Module
//!
//! Signed-token (JWT Bearer) identity for the API. Token issuance belongs
//! to the authentication subsystem; this module only verifies tokens and
//! resolves the caller's stable `user_id` from the `sub` claim.
//!
//! ## Auth Flow
//!
//! 1. The frontend obtains a JWT at login
//! 2. Requests carry `Authorization: Bearer <JWT>`
//! 3. The [`Auth`] extractor verifies the HS256 signature against the
//!    configured secret, checks expiry (60 s clock-skew leeway) and,
//!    when configured, the issuer
//!
//! Without a configured secret the extractor falls back to structure-only
//! decoding for development environments.

pub mod claims;
pub mod error;
pub mod extractor;

pub use claims::AuthenticatedUser;
pub use error::AuthError;
pub use extractor::Auth;
