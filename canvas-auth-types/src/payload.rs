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

//! Decoded `signed_request` payload.
//!
//! The host platform POSTs a `signed_request` parameter to the canvas page:
//! `base64url(hmac_sha256(secret, payload_segment)) "." base64url(json)`.
//! This module only describes the JSON half; verification lives in the
//! `canvas-auth` crate.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The only signing algorithm the host platform uses for signed requests.
pub const SIGNED_REQUEST_ALGORITHM: &str = "HMAC-SHA256";

/// JSON payload carried in the second segment of a signed request.
///
/// # Example payload
///
/// ```json
/// {
///   "algorithm": "HMAC-SHA256",
///   "issued_at": 1707001200,
///   "user_id": "123",
///   "oauth_token": "AAAB...",
///   "expires": 1707004800,
///   "user": { "locale": "en_US", "country": "us", "age": { "min": 21 } }
/// }
/// ```
///
/// Before the visitor authorizes the application only `algorithm`,
/// `issued_at` and `user` are present.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SignedRequestPayload {
    /// Declared signing algorithm, compared case-insensitively.
    pub algorithm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<i64>,
    /// Platform user id. Only present once the visitor has authorized the app.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth_token: Option<String>,
    /// Access token expiry, seconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<SignedRequestUser>,
    /// Fields this crate does not interpret (`page`, `app_data`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SignedRequestPayload {
    /// A payload for a visitor who has not authorized the application yet.
    pub fn unauthorized() -> Self {
        Self {
            algorithm: SIGNED_REQUEST_ALGORITHM.to_string(),
            issued_at: None,
            user_id: None,
            oauth_token: None,
            expires: None,
            user: None,
            extra: Map::new(),
        }
    }

    /// A payload carrying a complete set of credentials.
    pub fn authorized(user_id: &str, oauth_token: &str, expires: i64) -> Self {
        Self {
            user_id: Some(user_id.to_string()),
            oauth_token: Some(oauth_token.to_string()),
            expires: Some(expires),
            ..Self::unauthorized()
        }
    }
}

/// Anonymous visitor details. Informational only.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct SignedRequestUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<AgeRange>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct AgeRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}
