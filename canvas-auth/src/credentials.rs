/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Credential extraction from a verified signed request.

use crate::error::{AuthError, Result};
use crate::signed_request::VerifiedPayload;

/// Credentials granted by the host platform once the visitor authorized the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequestInfo {
    pub user_id: String,
    pub oauth_token: String,
    /// Seconds since the Unix epoch.
    pub expires: i64,
}

/// Pull the visitor's credentials out of a verified payload.
///
/// Returns `Ok(None)` when the payload has no `user_id`: the visitor has not
/// authorized the application yet, which is an expected state. A `user_id`
/// without a token or expiry is a protocol error.
pub fn extract(verified: &VerifiedPayload) -> Result<Option<SignedRequestInfo>> {
    let payload = verified.payload();

    if let Some(user) = &payload.user {
        tracing::debug!(
            issued_at = ?payload.issued_at,
            locale = user.locale.as_deref().unwrap_or_default(),
            country = user.country.as_deref().unwrap_or_default(),
            min_age = ?user.age.as_ref().and_then(|a| a.min),
            max_age = ?user.age.as_ref().and_then(|a| a.max),
            "Signed request visitor details"
        );
    }

    let user_id = match payload.user_id.as_deref() {
        Some(id) if !id.is_empty() => id,
        _ => return Ok(None),
    };

    tracing::info!("Signed request carries credentials for user {user_id}");

    let oauth_token = payload
        .oauth_token
        .clone()
        .ok_or_else(|| AuthError::IncompleteCredentials {
            user_id: user_id.to_string(),
            missing: "oauth_token",
        })?;

    let expires = payload
        .expires
        .ok_or_else(|| AuthError::IncompleteCredentials {
            user_id: user_id.to_string(),
            missing: "expires",
        })?;

    Ok(Some(SignedRequestInfo {
        user_id: user_id.to_string(),
        oauth_token,
        expires,
    }))
}
