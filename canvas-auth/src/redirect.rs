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

//! Authorization redirect URL.

/// Host platform's authorization dialog.
pub const DEFAULT_AUTH_URL: &str = "https://graph.facebook.com/oauth/authorize";

/// Build the URL that sends a visitor to the host platform to (re-)authorize the app.
///
/// `type=user_agent` is required when the app is launched standalone rather
/// than from a canvas page. `scope` is only added when permissions are
/// requested and keeps the caller's order. Values are inserted verbatim; the
/// host matches `redirect_uri` against the registered callback as-is.
pub fn build_redirect_url(
    auth_url: &str,
    redirect_url: &str,
    app_id: &str,
    permissions: &[String],
    dev_env: bool,
) -> String {
    let mut url = format!("{auth_url}?client_id={app_id}&redirect_uri={redirect_url}");

    if dev_env {
        url.push_str("&type=user_agent");
    }

    if !permissions.is_empty() {
        url.push_str("&scope=");
        url.push_str(&permissions.join(","));
    }

    tracing::debug!("Authorization redirect: {url}");
    url
}
