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

//! Per-request authorization decision.
//!
//! ```text
//! START ─┬─ signed_request ──> VERIFY ─┬─ credentials ──> STORE_UPDATED ──> FORWARD
//!        │                             └─ none ─────────┐
//!        └─ no signed_request ──────────────────────────┴─> CHECK_SESSION ─┬─ valid ──> FORWARD
//!                                                                          └─ invalid ─> REDIRECT
//! ```
//!
//! Verification and extraction failures are returned to the caller as
//! errors; they never fall back to the redirect path.

use std::sync::Arc;

use crate::config::Config;
use crate::credentials;
use crate::decision::needs_reauthorization;
use crate::error::Result;
use crate::redirect::build_redirect_url;
use crate::session::{store_credentials, SessionStore, TokenRecord};
use crate::signed_request;

/// Terminal state for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The session is usable; hand the request to the protected handler.
    Forward,
    /// Send the visitor to this authorization URL.
    Redirect(String),
}

/// Verifies signed requests and decides whether a visitor may proceed.
#[derive(Debug, Clone)]
pub struct CanvasGate {
    config: Arc<Config>,
}

impl CanvasGate {
    pub fn new(config: Config) -> Self {
        Self::from_shared(Arc::new(config))
    }

    pub fn from_shared(config: Arc<Config>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Authorization URL built from the configured app id, callback and permissions.
    pub fn redirect_url(&self) -> String {
        let config = &self.config;
        build_redirect_url(
            &config.auth_url,
            &config.callback_url(),
            &config.app_id,
            &config.permissions,
            config.dev_env,
        )
    }

    /// Run the state machine for one request.
    ///
    /// An empty `signed_request` is treated as absent. The session is written
    /// only after the signed request has been verified and its credentials
    /// extracted in full.
    pub fn authorize<S: SessionStore + ?Sized>(
        &self,
        signed_request: Option<&str>,
        store: &mut S,
        now: i64,
    ) -> Result<AuthOutcome> {
        let got_credentials = match signed_request.filter(|raw| !raw.is_empty()) {
            Some(raw) => self.accept_signed_request(raw, store)?,
            None => {
                tracing::debug!("No signed request param");
                false
            }
        };

        if got_credentials {
            return Ok(AuthOutcome::Forward);
        }

        let record = TokenRecord::load(store);
        if needs_reauthorization(&record, now) {
            tracing::info!("Redirecting visitor to host platform authorization");
            return Ok(AuthOutcome::Redirect(self.redirect_url()));
        }

        Ok(AuthOutcome::Forward)
    }

    /// Verify a signed request and store any credentials it carries.
    ///
    /// Returns `true` when credentials were stored.
    pub fn accept_signed_request<S: SessionStore + ?Sized>(
        &self,
        raw: &str,
        store: &mut S,
    ) -> Result<bool> {
        tracing::debug!("Found signed request");
        let verified = signed_request::verify(raw, self.config.app_secret.as_bytes())?;

        match credentials::extract(&verified)? {
            Some(info) => {
                tracing::debug!("Signed request has credentials (user {})", info.user_id);
                store_credentials(store, &info);
                Ok(true)
            }
            None => {
                tracing::debug!("Signed request lacks credentials");
                Ok(false)
            }
        }
    }
}
