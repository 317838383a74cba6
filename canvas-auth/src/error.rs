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

//! Error types.
//!
//! [`AuthError`] is the domain error produced by the verifier, the extractor,
//! the session accessors and configuration loading. [`AppError`] pairs an HTTP
//! status code with an [`APIError`] body and is what axum handlers return;
//! every `AuthError` that reaches the HTTP boundary becomes a 500.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use canvas_auth_types::{APIError, APIResponse};
use thiserror::Error;

/// Which step of signed-request decoding failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadStage {
    /// The raw value is not exactly `<signature>.<payload>`.
    Split,
    /// The signature segment is not valid base64url.
    Signature,
    /// The payload segment is not valid base64url.
    Payload,
    /// The decoded payload is not a JSON object of the expected shape.
    Json,
}

impl fmt::Display for PayloadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            PayloadStage::Split => "split",
            PayloadStage::Signature => "signature segment",
            PayloadStage::Payload => "payload segment",
            PayloadStage::Json => "payload json",
        };
        f.write_str(stage)
    }
}

/// Errors raised while loading configuration or authorizing a request.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Required startup configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Bad segment count, bad base64 or bad JSON.
    #[error("malformed signed request ({stage}): {detail}")]
    MalformedPayload { stage: PayloadStage, detail: String },

    /// The payload declares an algorithm other than HMAC-SHA256.
    #[error("unsupported signed request algorithm '{0}', expected HMAC-SHA256")]
    UnsupportedAlgorithm(String),

    /// The signature does not match the payload under the application secret.
    #[error("signed request signature mismatch")]
    SignatureMismatch,

    /// A user id was present without the rest of the credentials.
    #[error("signed request for user {user_id} is missing {missing}")]
    IncompleteCredentials {
        user_id: String,
        missing: &'static str,
    },

    /// The transport layer did not provide a usable session.
    #[error("session unavailable: {0}")]
    SessionUnavailable(String),
}

impl AuthError {
    pub(crate) fn malformed(stage: PayloadStage, detail: impl fmt::Display) -> Self {
        AuthError::MalformedPayload {
            stage,
            detail: detail.to_string(),
        }
    }

    /// Machine-readable code used in [`APIError::code`].
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::Config(_) => "CONFIG_ERROR",
            AuthError::MalformedPayload { .. } => "MALFORMED_SIGNED_REQUEST",
            AuthError::UnsupportedAlgorithm(_) => "UNSUPPORTED_ALGORITHM",
            AuthError::SignatureMismatch => "SIGNATURE_MISMATCH",
            AuthError::IncompleteCredentials { .. } => "INCOMPLETE_CREDENTIALS",
            AuthError::SessionUnavailable(_) => "SESSION_UNAVAILABLE",
        }
    }
}

pub type Result<T, E = AuthError> = std::result::Result<T, E>;

/// Application-level error that pairs an HTTP status code with an [`APIError`].
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub body: APIError,
}

impl AppError {
    pub fn new(status: StatusCode, body: APIError) -> Self {
        Self { status, body }
    }

    pub fn auth_denied(reason: &str, error: Option<&str>, description: Option<&str>) -> Self {
        Self::new(
            StatusCode::FORBIDDEN,
            APIError::auth_denied(reason, error, description),
        )
    }

    pub fn bad_callback(detail: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, APIError::bad_callback(detail))
    }

    pub fn invalid_body(detail: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, APIError::invalid_body(detail))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = APIResponse::error(self.body);
        (self.status, Json(body)).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        tracing::error!("Request authorization failed: {err}");
        let message = match &err {
            AuthError::Config(_) => "Server is misconfigured.",
            AuthError::SessionUnavailable(_) => "Session unavailable.",
            _ => "Signed request could not be verified.",
        };
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            APIError::new(err.code(), message, Some(err.to_string())),
        )
    }
}
