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

//! Axum router configuration for the canvas authorization callback.

pub mod callback;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Build the router serving the authorization callback at the configured path.
///
/// Protected canvas routes are merged in by the embedding application and
/// wrapped with [`crate::auth::require_canvas_login`].
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new().route(&state.config().callback_path, get(callback::auth_callback))
}
