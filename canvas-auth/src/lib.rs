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

//! Signed-request verification and login gate for canvas-embedded web apps.
//!
//! The host platform loads the app inside an iframe and POSTs a
//! `signed_request` on every page view. This crate verifies it, keeps the
//! visitor's access token in their session, and decides whether to serve the
//! page or send the visitor through the authorization dialog. The binary
//! entry point (`main.rs`) is a developer CLI over the same library.

pub mod auth;
pub mod cli_args;
pub mod codec;
pub mod config;
pub mod credentials;
pub mod decision;
pub mod error;
pub mod gate;
pub mod redirect;
pub mod routes;
pub mod session;
pub mod signed_request;
pub mod state;

pub use config::Config;
pub use credentials::SignedRequestInfo;
pub use error::{AppError, AuthError};
pub use gate::{AuthOutcome, CanvasGate};
pub use session::{MemorySessionStore, SessionHandle, SessionStore, TokenRecord};
pub use signed_request::VerifiedPayload;
pub use state::AppState;
