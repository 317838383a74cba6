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

//! Signed request verification.
//!
//! A signed request is `<signature>.<payload>` where both halves are unpadded
//! base64url, the payload is a JSON object and the signature is
//! HMAC-SHA256 over the **encoded** payload segment, keyed by the application
//! secret.

use canvas_auth_types::{SignedRequestPayload, SIGNED_REQUEST_ALGORITHM};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::codec;
use crate::error::{AuthError, PayloadStage, Result};

type HmacSha256 = Hmac<Sha256>;

/// A payload whose signature has been checked against the application secret.
///
/// Only [`verify`] can construct one, so anything holding a `VerifiedPayload`
/// is working with trusted data.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedPayload(SignedRequestPayload);

impl VerifiedPayload {
    pub fn payload(&self) -> &SignedRequestPayload {
        &self.0
    }

    pub fn into_payload(self) -> SignedRequestPayload {
        self.0
    }
}

/// Parse and verify a signed request.
///
/// Checks, in order:
/// 1. exactly two `.`-separated segments
/// 2. both segments decode, the payload is JSON with an `algorithm` field
/// 3. `algorithm` is HMAC-SHA256 (case-insensitive)
/// 4. the signature matches (constant-time comparison)
pub fn verify(raw: &str, secret: &[u8]) -> Result<VerifiedPayload> {
    let (signature_segment, payload_segment) = split(raw)?;

    let signature = codec::decode(signature_segment)
        .map_err(|e| AuthError::malformed(PayloadStage::Signature, e))?;
    let payload_bytes = codec::decode(payload_segment)
        .map_err(|e| AuthError::malformed(PayloadStage::Payload, e))?;
    let payload: SignedRequestPayload = serde_json::from_slice(&payload_bytes)
        .map_err(|e| AuthError::malformed(PayloadStage::Json, e))?;

    if !payload
        .algorithm
        .eq_ignore_ascii_case(SIGNED_REQUEST_ALGORITHM)
    {
        return Err(AuthError::UnsupportedAlgorithm(payload.algorithm));
    }

    let mut mac = new_mac(secret)?;
    mac.update(payload_segment.as_bytes());
    if mac.verify_slice(&signature).is_err() {
        tracing::warn!(
            "Signed request signature mismatch (payload segment {} bytes)",
            payload_segment.len()
        );
        return Err(AuthError::SignatureMismatch);
    }

    Ok(VerifiedPayload(payload))
}

/// Serialize `payload` and sign it, producing the wire form the host platform sends.
pub fn sign(payload: &SignedRequestPayload, secret: &[u8]) -> Result<String> {
    let json =
        serde_json::to_vec(payload).map_err(|e| AuthError::malformed(PayloadStage::Json, e))?;
    sign_bytes(&json, secret)
}

/// Sign raw JSON bytes without re-serializing them.
pub fn sign_bytes(json: &[u8], secret: &[u8]) -> Result<String> {
    let payload_segment = codec::encode(json);
    let mut mac = new_mac(secret)?;
    mac.update(payload_segment.as_bytes());
    let signature = mac.finalize().into_bytes();
    Ok(format!("{}.{payload_segment}", codec::encode(signature)))
}

fn split(raw: &str) -> Result<(&str, &str)> {
    let mut parts = raw.split('.');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(signature), Some(payload), None) => Ok((signature, payload)),
        _ => Err(AuthError::malformed(
            PayloadStage::Split,
            format!("expected 2 segments, found {}", raw.split('.').count()),
        )),
    }
}

fn new_mac(secret: &[u8]) -> Result<HmacSha256> {
    HmacSha256::new_from_slice(secret)
        .map_err(|e| AuthError::Config(format!("unusable application secret: {e}")))
}
