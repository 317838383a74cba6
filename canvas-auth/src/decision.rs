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

//! Decide whether the session's access token is still usable.

use chrono::Utc;

use crate::session::TokenRecord;

/// A token this close to expiry is treated as already expired.
pub const EXPIRY_MARGIN_SECS: i64 = 30;

/// Current wall-clock time in seconds since the Unix epoch.
pub fn epoch() -> i64 {
    Utc::now().timestamp()
}

/// Returns `true` when the visitor must be sent through authorization again.
///
/// The session is usable only when all three fields are present, `expires`
/// parses as an integer, and `now + EXPIRY_MARGIN_SECS < expires`.
pub fn needs_reauthorization(record: &TokenRecord, now: i64) -> bool {
    if record.user_id.is_none() {
        tracing::debug!("No user id in session");
        return true;
    }
    if record.access_token.is_none() {
        tracing::debug!("No access token in session");
        return true;
    }
    let Some(raw_expires) = record.expires.as_deref() else {
        tracing::debug!("No expiry in session");
        return true;
    };

    let expires = match raw_expires.trim().parse::<i64>() {
        Ok(expires) => expires,
        Err(_) => {
            tracing::error!("Session expiry is not a valid epoch timestamp: {raw_expires}");
            return true;
        }
    };

    if now.saturating_add(EXPIRY_MARGIN_SECS) >= expires {
        tracing::debug!(
            "Access token expired or expires within {EXPIRY_MARGIN_SECS}s: expires={expires}, now={now}"
        );
        return true;
    }

    let mins_left = expires.saturating_sub(now) as f64 / 60.0;
    tracing::debug!("Session valid until {expires} (now={now}, {mins_left:.2} mins left)");
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn record(expires: &str) -> TokenRecord {
        TokenRecord {
            user_id: Some("123".to_string()),
            access_token: Some("tok".to_string()),
            expires: Some(expires.to_string()),
        }
    }

    #[test]
    fn complete_fresh_session_is_usable() {
        assert!(!needs_reauthorization(&record(&(NOW + 3600).to_string()), NOW));
    }

    #[test]
    fn each_missing_field_forces_reauthorization() {
        let full = record(&(NOW + 3600).to_string());
        let cases = [
            TokenRecord {
                user_id: None,
                ..full.clone()
            },
            TokenRecord {
                access_token: None,
                ..full.clone()
            },
            TokenRecord {
                expires: None,
                ..full.clone()
            },
            TokenRecord::default(),
        ];
        for case in cases {
            assert!(needs_reauthorization(&case, NOW), "{case:?}");
        }
    }

    #[test]
    fn unparseable_expiry_forces_reauthorization() {
        for raw in ["soon", "12.5", "0x10", ""] {
            assert!(needs_reauthorization(&record(raw), NOW), "expires={raw:?}");
        }
    }

    #[test]
    fn expiry_inside_margin_forces_reauthorization() {
        assert!(needs_reauthorization(&record(&(NOW + 10).to_string()), NOW));
    }

    #[test]
    fn boundary_is_exclusive_of_the_margin() {
        let at_margin = (NOW + EXPIRY_MARGIN_SECS).to_string();
        let past_margin = (NOW + EXPIRY_MARGIN_SECS + 1).to_string();
        assert!(needs_reauthorization(&record(&at_margin), NOW));
        assert!(!needs_reauthorization(&record(&past_margin), NOW));
    }

    #[test]
    fn extreme_clock_values_do_not_overflow() {
        assert!(!needs_reauthorization(&record(&i64::MAX.to_string()), i64::MIN));
        assert!(needs_reauthorization(&record(&i64::MIN.to_string()), i64::MAX));
        assert!(needs_reauthorization(&record(&i64::MAX.to_string()), i64::MAX));
    }

    #[test]
    fn decision_is_monotonic_in_expiry() {
        for offset in -120..=120 {
            let expires = NOW + offset;
            let expected = expires <= NOW + EXPIRY_MARGIN_SECS;
            assert_eq!(
                needs_reauthorization(&record(&expires.to_string()), NOW),
                expected,
                "expires = now {offset:+}"
            );
        }
    }
}
