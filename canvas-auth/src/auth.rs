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

//! Axum middleware that keeps protected routes behind the canvas login.
//!
//! Wrap protected routes with
//! `axum::middleware::from_fn_with_state(state, require_canvas_login)`.
//! The transport layer must attach a [`SessionHandle`] to each request as an
//! extension before this middleware runs.

use axum::{
    body::{self, Body, HttpBody},
    extract::{Request, State},
    http::{header, Method},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::decision::epoch;
use crate::error::{AppError, AuthError};
use crate::gate::AuthOutcome;
use crate::session::SessionHandle;
use crate::state::AppState;

/// Form/query parameter the host platform uses for the signed request.
pub const SIGNED_REQUEST_PARAM: &str = "signed_request";

/// Upper bound on a buffered form body.
const MAX_FORM_BYTES: usize = 64 * 1024;

/// Forward the request to the protected handler, or redirect the visitor to
/// the host platform's authorization dialog.
///
/// A signed request that fails verification produces a 500 response; it is
/// never silently downgraded to a redirect.
pub async fn require_canvas_login(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    tracing::info!("Canvas login check for {}", request.uri().path());

    if !state.config().enforce_login {
        return Ok(next.run(request).await);
    }

    let session = request
        .extensions()
        .get::<SessionHandle>()
        .cloned()
        .ok_or_else(|| AuthError::SessionUnavailable("no session attached to request".into()))?;

    let (request, signed_request) = take_signed_request(request).await?;

    let outcome = {
        let mut store = session
            .0
            .lock()
            .map_err(|_| AuthError::SessionUnavailable("session lock poisoned".into()))?;
        state
            .gate
            .authorize(signed_request.as_deref(), &mut *store, epoch())?
    };

    match outcome {
        AuthOutcome::Forward => Ok(next.run(request).await),
        AuthOutcome::Redirect(url) => Ok(Redirect::to(&url).into_response()),
    }
}

/// Find `signed_request` in a form-encoded POST body, falling back to the
/// query string. A consumed body is put back so the handler can still read it.
///
/// Bodies that may exceed [`MAX_FORM_BYTES`] are left untouched; only the
/// query string is consulted for them.
async fn take_signed_request(request: Request) -> Result<(Request, Option<String>), AppError> {
    let request = if request.method() == Method::POST && is_form(&request) {
        let (parts, body) = request.into_parts();
        let fits = body
            .size_hint()
            .upper()
            .is_some_and(|upper| upper <= MAX_FORM_BYTES as u64);
        if fits {
            let bytes = body::to_bytes(body, MAX_FORM_BYTES)
                .await
                .map_err(|e| AppError::invalid_body(&e.to_string()))?;
            if let Some(value) = find_param(&bytes) {
                return Ok((Request::from_parts(parts, Body::from(bytes)), Some(value)));
            }
            Request::from_parts(parts, Body::from(bytes))
        } else {
            tracing::debug!("Form body too large to scan for a signed request");
            Request::from_parts(parts, body)
        }
    } else {
        request
    };

    let from_query = request
        .uri()
        .query()
        .and_then(|query| find_param(query.as_bytes()));
    Ok((request, from_query))
}

fn is_form(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

fn find_param(encoded: &[u8]) -> Option<String> {
    url::form_urlencoded::parse(encoded)
        .find(|(key, value)| key == SIGNED_REQUEST_PARAM && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}
