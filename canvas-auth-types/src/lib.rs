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

//! Shared wire types for the canvas signed-request gate.
//!
//! This crate defines the JSON shapes exchanged with the host platform (the
//! decoded `signed_request` payload) and the error envelope returned to
//! browsers when a request cannot be authorized.
//! It is intentionally framework-agnostic: no axum, no crypto.

pub mod error;
pub mod payload;
pub mod responses;

pub use error::APIError;
pub use payload::{AgeRange, SignedRequestPayload, SignedRequestUser, SIGNED_REQUEST_ALGORITHM};
pub use responses::APIResponse;
