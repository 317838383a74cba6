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

//! API error types.
//!
//! Every failed response is returned as `APIResponse<APIError>` with `success: false`.

use serde::{Deserialize, Serialize};

/// Structured error returned in the `result` field of a failed [`super::APIResponse`].
///
/// The `code` field is a machine-readable identifier (e.g. `"SIGNATURE_MISMATCH"`).
/// The `message` field is a human-readable description suitable for display.
/// The `engineering_error` field carries debug-level detail (which decoding stage
/// failed, which field was missing) that is useful during development but should
/// be stripped or redacted in production.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct APIError {
    /// Machine-readable error code (e.g. `"SIGNATURE_MISMATCH"`, `"AUTH_DENIED"`).
    pub code: String,

    /// Human-readable error message.
    pub message: String,

    /// Optional engineering-level detail for debugging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engineering_error: Option<String>,
}

impl APIError {
    pub fn new(code: &str, message: &str, engineering_error: Option<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            engineering_error,
        }
    }

    /// The visitor declined to authorize the application on the host platform.
    pub fn auth_denied(reason: &str, error: Option<&str>, description: Option<&str>) -> Self {
        Self {
            code: "AUTH_DENIED".to_string(),
            message: "The application was not authorized.".to_string(),
            engineering_error: Some(format!(
                "error_reason='{reason}', error='{}', error_description='{}'",
                error.unwrap_or_default(),
                description.unwrap_or_default()
            )),
        }
    }

    pub fn bad_callback(detail: &str) -> Self {
        Self::new(
            "BAD_CALLBACK",
            "Unrecognized authorization callback.",
            Some(detail.to_string()),
        )
    }

    pub fn invalid_body(detail: &str) -> Self {
        Self::new(
            "INVALID_BODY",
            "Request body could not be read.",
            Some(detail.to_string()),
        )
    }
}

impl std::fmt::Display for APIError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for APIError {}
