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

//! Base64url helpers for signed-request segments.
//!
//! The host platform strips `=` padding from both segments. Decoding restores
//! it before handing the segment to a padded URL-safe engine.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine;

pub use base64::DecodeError;

/// URL-safe alphabet, padding required, non-zero trailing bits tolerated.
const URL_SAFE_PADDED: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical)
        .with_decode_allow_trailing_bits(true),
);

/// Decode an unpadded (or already padded) base64url segment.
pub fn decode(segment: &str) -> Result<Vec<u8>, DecodeError> {
    let mut padded = String::with_capacity(segment.len() + 3);
    padded.push_str(segment);
    while padded.len() % 4 != 0 {
        padded.push('=');
    }
    URL_SAFE_PADDED.decode(padded)
}

/// Encode bytes as unpadded base64url.
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}
