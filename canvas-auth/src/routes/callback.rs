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

//! Handler for the host platform redirecting back after the authorization dialog.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub error_reason: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// GET <callback_path>
///
/// A denial carries `error_reason`; a grant carries `code`, after which the
/// visitor is sent back into the canvas where the next signed request will
/// carry their credentials.
pub async fn auth_callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Result<Response, AppError> {
    if let Some(reason) = query.error_reason.as_deref() {
        tracing::info!(
            "Visitor denied authorization: reason={reason} error={:?} description={:?}",
            query.error,
            query.error_description
        );
        return Err(AppError::auth_denied(
            reason,
            query.error.as_deref(),
            query.error_description.as_deref(),
        ));
    }

    if query.code.is_some() {
        let canvas_url = &state.config().canvas_url;
        tracing::info!("Authorization granted, returning visitor to {canvas_url}");
        return Ok(Redirect::to(canvas_url).into_response());
    }

    tracing::warn!("Authorization callback without code or error_reason");
    Err(AppError::bad_callback(
        "expected either `code` or `error_reason` in the callback query",
    ))
}
